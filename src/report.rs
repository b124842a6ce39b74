//! The report page around a formatted analysis, and the search response it
//! comes from.

use chrono::{Local, NaiveDate};
use html_escape::encode_text;
use serde::Deserialize;

use crate::Formatter;
use crate::error::{Error, Result};

const DISCLAIMER: &str = "注意：本报告中的数据仅供参考，具体信息请以官方发布为准。";

/// Body of a `/search` response: either an analysis or an error message.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    pub analysis: Option<String>,
    pub error: Option<String>,
}

impl SearchResponse {
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// The analysis text, or [`Error::Backend`] when the backend reported one.
    pub fn into_analysis(self) -> Result<Option<String>> {
        match self.error {
            Some(message) if !message.trim().is_empty() => Err(Error::Backend(message)),
            _ => Ok(self.analysis),
        }
    }
}

/// Header details shown above the analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportMeta {
    pub suburb: String,
    pub generated_on: NaiveDate,
    pub elapsed_secs: Option<f64>,
}

impl ReportMeta {
    /// Metadata for a report generated today.
    pub fn new(suburb: &str) -> Result<Self> {
        let suburb = suburb.trim();
        if suburb.is_empty() {
            return Err(Error::EmptySuburb);
        }
        Ok(Self {
            suburb: suburb.to_string(),
            generated_on: Local::now().date_naive(),
            elapsed_secs: None,
        })
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.generated_on = date;
        self
    }

    pub fn with_elapsed(mut self, secs: f64) -> Self {
        self.elapsed_secs = Some(secs);
        self
    }
}

/// Render the full report section: header, then the formatted analysis.
pub fn render_report(formatter: &Formatter, meta: &ReportMeta, analysis: Option<&str>) -> String {
    let mut out = String::from("<div class=\"report-header\">\n");
    out.push_str(&format!(
        "<h2>{} 区域分析报告</h2>\n",
        encode_text(&meta.suburb)
    ));
    out.push_str(&format!(
        "<p class=\"report-date\">生成日期：{}</p>\n",
        meta.generated_on.format("%Y年%-m月%-d日")
    ));
    if let Some(secs) = meta.elapsed_secs {
        out.push_str(&format!(
            "<p class=\"analysis-time\">分析耗时：{secs:.1} 秒</p>\n"
        ));
    }
    out.push_str(&format!("<p class=\"disclaimer\">{DISCLAIMER}</p>\n"));
    out.push_str("</div>\n");

    out.push_str("<div class=\"report-content\">\n");
    out.push_str(&formatter.format_opt(analysis));
    out.push_str("</div>\n");
    out
}
