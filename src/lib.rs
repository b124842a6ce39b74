//! Render line-oriented analysis reports as HTML.
//!
//! A report is plain text with loose markdown conventions: `#` headings,
//! `- ` and `a.` list items, `|` tables and `优势：` / `劣势：` call-outs.
//! Each line is classified by an ordered, configurable rule list and
//! adjacent list items and table rows are grouped into one container.
//!
//! ```
//! let html = analysis_format::format_analysis("# Title\n- a\n- b\nplain");
//! assert!(html.contains("<li>a</li><li>b</li>"));
//! ```

mod block;
mod config;
mod error;
mod html;
mod inline;
mod line;
mod parser;
mod report;

pub use block::{Block, CalloutKind, List, ListItem, Span, plain_text};
pub use config::{
    CalloutConfig, Config, HeadingConfig, InlineConfig, ListConfig, RenderConfig, RulesConfig,
    SpecialHeading, TableConfig,
};
pub use error::{Error, Result};
pub use line::{Classifier, Line, Rule};
pub use report::{ReportMeta, SearchResponse, render_report};

/// Report formatter built from a [`Config`].
pub struct Formatter {
    classifier: Classifier,
    inline_markdown: bool,
    render: RenderConfig,
}

impl Formatter {
    pub fn new(config: &Config) -> Result<Self> {
        let classifier = Classifier::from_config(config)?;
        log::debug!("classification order: {:?}", classifier.rule_names());
        Ok(Self {
            classifier,
            inline_markdown: config.inline.markdown,
            render: config.render.clone(),
        })
    }

    /// Parse report text into a vector of blocks.
    pub fn parse(&self, text: &str) -> Vec<Block> {
        parser::parse(text, &self.classifier, self.inline_markdown)
    }

    /// Convert report text to HTML. Empty reports yield the placeholder block.
    pub fn format(&self, text: &str) -> String {
        let blocks = self.parse(text);
        if blocks.is_empty() {
            log::warn!("analysis content is empty");
            return html::placeholder(&self.render);
        }
        html::blocks_to_html(&blocks, &self.render)
    }

    /// Like [`Formatter::format`], treating a missing report as empty.
    pub fn format_opt(&self, text: Option<&str>) -> String {
        self.format(text.unwrap_or_default())
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }
}

impl Default for Formatter {
    /// Formatter for the compiled default rule set.
    fn default() -> Self {
        Self::new(&Config::compiled_default()).expect("built-in rule order is valid")
    }
}

/// Parse report text into blocks using the default rule set.
pub fn parse(text: &str) -> Vec<Block> {
    Formatter::default().parse(text)
}

/// Convert report text to HTML using the default rule set.
pub fn format_analysis(text: &str) -> String {
    Formatter::default().format(text)
}
