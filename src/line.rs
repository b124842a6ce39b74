//! Per-line classification.
//!
//! Every non-blank line of a report is matched against an ordered list of
//! [`Rule`]s. The first rule that accepts the line decides its [`Line`] kind;
//! a line no rule accepts is a paragraph.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::block::CalloutKind;
use crate::config::{CalloutConfig, Config, HeadingConfig, ListConfig};
use crate::error::{Error, Result};

static MARKDOWN_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.*)$").expect("valid heading regex"));
static NUMBERED_SUBHEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+\.?\s+(.+)$").expect("valid heading regex"));
static NUMBERED_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s+(.+)$").expect("valid heading regex"));
static LABELED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\x{4e00}-\x{9fa5}]\d*\.").expect("valid list regex"));

/// Classified shape of a single trimmed line.
#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    Callout {
        kind: CalloutKind,
        label: String,
        items: Vec<String>,
    },
    Heading {
        level: u8,
        text: String,
    },
    TableRow(Vec<String>),
    TableSeparator,
    ListItem(String),
    Paragraph(String),
}

/// One entry of the classification precedence list.
pub trait Rule: Send + Sync {
    fn name(&self) -> &'static str;

    /// Classify a trimmed, non-blank line, or `None` to defer to the next rule.
    fn classify(&self, line: &str) -> Option<Line>;
}

pub struct CalloutRule {
    advantages: String,
    disadvantages: String,
    delimiters: Vec<String>,
}

impl CalloutRule {
    pub fn new(config: &CalloutConfig) -> Self {
        Self {
            advantages: config.advantages.clone(),
            disadvantages: config.disadvantages.clone(),
            delimiters: config
                .delimiters
                .iter()
                .filter(|d| !d.is_empty())
                .cloned()
                .collect(),
        }
    }

    fn split_items(&self, rest: &str) -> Vec<String> {
        let mut items = vec![rest];
        for delimiter in &self.delimiters {
            items = items
                .into_iter()
                .flat_map(|item| item.split(delimiter.as_str()))
                .collect();
        }
        items
            .into_iter()
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(String::from)
            .collect()
    }
}

impl Rule for CalloutRule {
    fn name(&self) -> &'static str {
        "callout"
    }

    fn classify(&self, line: &str) -> Option<Line> {
        let (kind, label) = if !self.advantages.is_empty() && line.starts_with(&self.advantages) {
            (CalloutKind::Advantages, &self.advantages)
        } else if !self.disadvantages.is_empty() && line.starts_with(&self.disadvantages) {
            (CalloutKind::Disadvantages, &self.disadvantages)
        } else {
            return None;
        };

        Some(Line::Callout {
            kind,
            label: label.clone(),
            items: self.split_items(&line[label.len()..]),
        })
    }
}

pub struct HeadingRule {
    config: HeadingConfig,
}

impl HeadingRule {
    pub fn new(config: &HeadingConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

impl Rule for HeadingRule {
    fn name(&self) -> &'static str {
        "heading"
    }

    fn classify(&self, line: &str) -> Option<Line> {
        if let Some(level) = self.config.special_level(line) {
            return Some(Line::Heading {
                level,
                text: line.to_string(),
            });
        }

        if self.config.markdown {
            if let Some(caps) = MARKDOWN_HEADING.captures(line) {
                let level = if caps[1].len() == 1 { 1 } else { 2 };
                let text = caps[2].trim();
                if !text.is_empty() {
                    return Some(Line::Heading {
                        level,
                        text: text.to_string(),
                    });
                }
            }
        }

        if self.config.numbered {
            // `N.M` is checked first so `1.2 Foo` is not read as `1.` + `2 Foo`
            if let Some(caps) = NUMBERED_SUBHEADING.captures(line) {
                return Some(Line::Heading {
                    level: 2,
                    text: caps[1].trim().to_string(),
                });
            }
            if let Some(caps) = NUMBERED_HEADING.captures(line) {
                return Some(Line::Heading {
                    level: 1,
                    text: caps[1].trim().to_string(),
                });
            }
        }

        None
    }
}

pub struct TableRule;

impl TableRule {
    fn is_separator(line: &str) -> bool {
        line.chars()
            .all(|c| c.is_whitespace() || matches!(c, '-' | '|' | ':'))
    }

    fn cells(line: &str) -> Vec<String> {
        let line = line.strip_prefix('|').unwrap_or(line);
        let line = line.strip_suffix('|').unwrap_or(line);
        line.split('|').map(|cell| cell.trim().to_string()).collect()
    }
}

impl Rule for TableRule {
    fn name(&self) -> &'static str {
        "table"
    }

    fn classify(&self, line: &str) -> Option<Line> {
        if !line.contains('|') {
            return None;
        }
        if Self::is_separator(line) {
            return Some(Line::TableSeparator);
        }
        Some(Line::TableRow(Self::cells(line)))
    }
}

pub struct ListRule {
    config: ListConfig,
}

impl ListRule {
    pub fn new(config: &ListConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

impl Rule for ListRule {
    fn name(&self) -> &'static str {
        "list"
    }

    fn classify(&self, line: &str) -> Option<Line> {
        if self.config.dash {
            if let Some(rest) = line.strip_prefix("- ") {
                return Some(Line::ListItem(rest.trim().to_string()));
            }
        }
        if self.config.labeled && LABELED_ITEM.is_match(line) {
            let rest = line.split_once('.').map_or(line, |(_, rest)| rest);
            return Some(Line::ListItem(rest.trim().to_string()));
        }
        None
    }
}

/// Ordered rule list evaluated top to bottom for each line.
pub struct Classifier {
    rules: Vec<Box<dyn Rule>>,
}

impl Classifier {
    /// Build the rule list in the order given by `[rules] order`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut rules: Vec<Box<dyn Rule>> = Vec::with_capacity(config.rules.order.len());

        for name in &config.rules.order {
            let name = name.trim().to_ascii_lowercase();
            if !seen.insert(name.clone()) {
                return Err(Error::DuplicateRule(name));
            }
            match name.as_str() {
                "callout" => rules.push(Box::new(CalloutRule::new(&config.callouts))),
                "heading" => rules.push(Box::new(HeadingRule::new(&config.headings))),
                "table" => {
                    if config.tables.enabled {
                        rules.push(Box::new(TableRule));
                    }
                }
                "list" => rules.push(Box::new(ListRule::new(&config.lists))),
                _ => return Err(Error::UnknownRule(name)),
            }
        }

        Ok(Self { rules })
    }

    /// Rule names in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Classify a trimmed, non-blank line.
    pub fn classify(&self, line: &str) -> Line {
        for rule in &self.rules {
            if let Some(classified) = rule.classify(line) {
                log::trace!("{} rule matched {:?}", rule.name(), line);
                return classified;
            }
        }
        Line::Paragraph(line.to_string())
    }
}
