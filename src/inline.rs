use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use crate::block::Span;

/// Convert the text of one report line into spans.
///
/// With `markdown` off the text is kept verbatim as a single span. With it on,
/// emphasis, inline code and links are parsed; block-level markup that
/// pulldown-cmark might see in a lone line (list markers, quotes) is dropped
/// and only its inline content is kept.
pub fn parse_spans(text: &str, markdown: bool) -> Vec<Span> {
    if !markdown || !text.contains(['*', '_', '`', '[', '~']) {
        return vec![Span::Text(text.to_string())];
    }

    let mut state = SpanState::default();
    for event in Parser::new_ext(text, Options::ENABLE_STRIKETHROUGH) {
        process_event(event, &mut state);
    }

    // Unbalanced stacks cannot happen with a well-formed event stream, but
    // fold any leftovers back in rather than lose text
    while let Some(mut parent) = state.span_stack.pop() {
        parent.append(&mut state.spans);
        state.spans = parent;
    }

    if state.spans.is_empty() {
        vec![Span::Text(text.to_string())]
    } else {
        merge_text(state.spans)
    }
}

#[derive(Default)]
struct SpanState {
    // Current inline content being built
    spans: Vec<Span>,
    // Parent buffers for nested formatting
    span_stack: Vec<Vec<Span>>,
    // Destinations of the open links
    link_stack: Vec<String>,
}

fn process_event(event: Event, state: &mut SpanState) {
    match event {
        Event::Text(text) | Event::Html(text) | Event::InlineHtml(text) => {
            state.spans.push(Span::Text(text.into_string()));
        }
        Event::Code(code) => {
            state.spans.push(Span::Code(code.into_string()));
        }

        Event::Start(Tag::Link { dest_url, .. }) => {
            state.link_stack.push(dest_url.into_string());
            state.span_stack.push(std::mem::take(&mut state.spans));
        }
        Event::Start(Tag::Strong | Tag::Emphasis | Tag::Strikethrough) => {
            state.span_stack.push(std::mem::take(&mut state.spans));
        }
        Event::End(end @ (TagEnd::Strong | TagEnd::Emphasis | TagEnd::Strikethrough | TagEnd::Link)) => {
            let inner = std::mem::take(&mut state.spans);
            let Some(mut parent) = state.span_stack.pop() else {
                state.spans = inner;
                return;
            };
            match end {
                TagEnd::Strong => parent.push(Span::Bold(inner)),
                TagEnd::Emphasis => parent.push(Span::Italic(inner)),
                TagEnd::Link => {
                    let url = state.link_stack.pop().unwrap_or_default();
                    parent.push(Span::Link {
                        url,
                        content: inner,
                    });
                }
                // No strikethrough span; keep the text
                _ => parent.extend(inner),
            }
            state.spans = parent;
        }

        Event::SoftBreak | Event::HardBreak => {
            state.spans.push(Span::Text(" ".to_string()));
        }

        // Ignore other events
        _ => {}
    }
}

/// Join adjacent text spans that pulldown-cmark emitted separately.
fn merge_text(spans: Vec<Span>) -> Vec<Span> {
    let mut merged: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans {
        match (merged.last_mut(), span) {
            (Some(Span::Text(prev)), Span::Text(next)) => prev.push_str(&next),
            (_, span) => merged.push(span),
        }
    }
    merged
}
