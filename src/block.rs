use serde::Serialize;

/// Inline text spans with formatting
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Span {
    Text(String),
    Bold(Vec<Span>),
    Italic(Vec<Span>),
    Code(String),
    Link { url: String, content: Vec<Span> },
}

impl Span {
    /// Visible text of the span with all formatting removed.
    pub fn plain_text(&self) -> String {
        match self {
            Span::Text(text) | Span::Code(text) => text.clone(),
            Span::Bold(inner) | Span::Italic(inner) | Span::Link { content: inner, .. } => {
                plain_text(inner)
            }
        }
    }
}

/// Visible text of a run of spans.
pub fn plain_text(spans: &[Span]) -> String {
    spans.iter().map(Span::plain_text).collect()
}

/// A single list item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    pub content: Vec<Span>,
}

/// A run of adjacent list lines
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct List {
    pub items: Vec<ListItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CalloutKind {
    Advantages,
    Disadvantages,
}

impl CalloutKind {
    /// CSS class of the callout container.
    pub fn class(self) -> &'static str {
        match self {
            CalloutKind::Advantages => "advantages",
            CalloutKind::Disadvantages => "disadvantages",
        }
    }
}

/// Block-level elements derived from a report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Heading {
        level: u8,
        content: Vec<Span>,
    },
    Paragraph {
        content: Vec<Span>,
    },
    List(List),
    Table {
        headers: Option<Vec<Vec<Span>>>,
        rows: Vec<Vec<Vec<Span>>>,
    },
    Callout {
        #[serde(rename = "callout")]
        kind: CalloutKind,
        /// Prefix as written in the report, e.g. `优势：`
        label: String,
        items: Vec<Vec<Span>>,
    },
}
