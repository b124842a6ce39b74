use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::block::{Block, List, Span};
use crate::config::RenderConfig;

/// Convert blocks to an HTML fragment, one block per line.
pub fn blocks_to_html(blocks: &[Block], config: &RenderConfig) -> String {
    let mut out = String::new();
    for block in blocks {
        emit_block(block, config, &mut out);
        out.push('\n');
    }
    out
}

/// The block shown when a report has no content.
pub fn placeholder(config: &RenderConfig) -> String {
    format!("<p>{}</p>\n", encode_text(&config.placeholder))
}

fn emit_block(block: &Block, config: &RenderConfig, out: &mut String) {
    match block {
        Block::Heading { level, content } => {
            let (tag, class) = if *level <= 1 {
                ("h2", &config.primary_title_class)
            } else {
                ("h3", &config.secondary_title_class)
            };
            open_tag(tag, class, out);
            spans_to_html(content, out);
            out.push_str(&format!("</{tag}>"));
        }
        Block::Paragraph { content } => {
            out.push_str("<p>");
            spans_to_html(content, out);
            out.push_str("</p>");
        }
        Block::List(list) => list_to_html(list, out),
        Block::Table { headers, rows } => {
            table_to_html(headers.as_deref(), rows, &config.table_class, out);
        }
        Block::Callout { kind, label, items } => {
            open_tag("div", kind.class(), out);
            out.push_str("<h4>");
            out.push_str(&encode_text(label));
            out.push_str("</h4><ul>");
            for item in items {
                out.push_str("<li>");
                spans_to_html(item, out);
                out.push_str("</li>");
            }
            out.push_str("</ul></div>");
        }
    }
}

fn open_tag(tag: &str, class: &str, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    if !class.is_empty() {
        out.push_str(" class=\"");
        out.push_str(&encode_double_quoted_attribute(class));
        out.push('"');
    }
    out.push('>');
}

fn spans_to_html(spans: &[Span], out: &mut String) {
    for span in spans {
        span_to_html(span, out);
    }
}

fn span_to_html(span: &Span, out: &mut String) {
    match span {
        Span::Text(text) => out.push_str(&encode_text(text)),
        Span::Bold(inner) => {
            out.push_str("<strong>");
            spans_to_html(inner, out);
            out.push_str("</strong>");
        }
        Span::Italic(inner) => {
            out.push_str("<em>");
            spans_to_html(inner, out);
            out.push_str("</em>");
        }
        Span::Code(text) => {
            out.push_str("<code>");
            out.push_str(&encode_text(text));
            out.push_str("</code>");
        }
        Span::Link { url, content } => {
            out.push_str("<a href=\"");
            out.push_str(&encode_double_quoted_attribute(url));
            out.push_str("\">");
            spans_to_html(content, out);
            out.push_str("</a>");
        }
    }
}

fn list_to_html(list: &List, out: &mut String) {
    out.push_str("<ul>");
    for item in &list.items {
        out.push_str("<li>");
        spans_to_html(&item.content, out);
        out.push_str("</li>");
    }
    out.push_str("</ul>");
}

fn table_to_html(
    headers: Option<&[Vec<Span>]>,
    rows: &[Vec<Vec<Span>>],
    class: &str,
    out: &mut String,
) {
    open_tag("table", class, out);

    if let Some(headers) = headers {
        out.push_str("<thead><tr>");
        for cell in headers {
            out.push_str("<th>");
            spans_to_html(cell, out);
            out.push_str("</th>");
        }
        out.push_str("</tr></thead>");
    }

    out.push_str("<tbody>");
    for row in rows {
        out.push_str("<tr>");
        for cell in row {
            out.push_str("<td>");
            spans_to_html(cell, out);
            out.push_str("</td>");
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
}
