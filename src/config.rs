use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{Error, Result};

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub rules: RulesConfig,
    pub callouts: CalloutConfig,
    pub headings: HeadingConfig,
    pub lists: ListConfig,
    pub tables: TableConfig,
    pub inline: InlineConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Rule names in precedence order: `callout`, `heading`, `table`, `list`.
    pub order: Vec<String>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            order: ["callout", "heading", "table", "list"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CalloutConfig {
    pub advantages: String,
    pub disadvantages: String,
    pub delimiters: Vec<String>,
}

impl Default for CalloutConfig {
    fn default() -> Self {
        Self {
            advantages: "优势：".to_string(),
            disadvantages: "劣势：".to_string(),
            delimiters: vec!["，".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HeadingConfig {
    pub markdown: bool,
    pub numbered: bool,
    pub special: Vec<SpecialHeading>,
}

impl Default for HeadingConfig {
    fn default() -> Self {
        Self {
            markdown: true,
            numbered: false,
            special: Vec::new(),
        }
    }
}

/// A section title that becomes a heading when a line is exactly that text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpecialHeading {
    pub text: String,
    #[serde(default = "default_special_level")]
    pub level: u8,
}

fn default_special_level() -> u8 {
    1
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    pub dash: bool,
    pub labeled: bool,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            dash: true,
            labeled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub enabled: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct InlineConfig {
    pub markdown: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub placeholder: String,
    pub primary_title_class: String,
    pub secondary_title_class: String,
    pub table_class: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            placeholder: "暂无分析内容".to_string(),
            primary_title_class: "primary-title".to_string(),
            secondary_title_class: "secondary-title".to_string(),
            table_class: "comparison-table".to_string(),
        }
    }
}

impl HeadingConfig {
    /// Level for a line that exactly matches a special section title.
    pub fn special_level(&self, line: &str) -> Option<u8> {
        let title = line.trim_end_matches(['：', ':']);
        self.special
            .iter()
            .find(|s| s.text == title)
            .map(|s| s.level.clamp(1, 2))
    }
}

impl Config {
    /// The rule set shipped in `default_config.toml`.
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Parse a config from TOML text.
    pub fn from_toml(content: &str, origin: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|source| Error::Config {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load config from a TOML file, or return defaults if not found.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => {
                log::debug!("Loaded config from {}", path.display());
                Self::from_toml(&content, path)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                Ok(Self::compiled_default())
            }
            Err(source) => Err(Error::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}
