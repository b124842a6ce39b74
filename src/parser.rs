use crate::block::{Block, List, ListItem, Span};
use crate::inline::parse_spans;
use crate::line::{Classifier, Line};

/// Group the classified lines of a report into blocks.
///
/// Blank lines are dropped before classification, so they never split a
/// list or table; only a line of another kind closes the open container.
pub fn parse(text: &str, classifier: &Classifier, inline_markdown: bool) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut state = ParseState {
        inline_markdown,
        ..ParseState::default()
    };

    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        process_line(classifier.classify(line), &mut state, &mut blocks);
    }
    state.close_containers(&mut blocks);

    log::debug!("grouped report into {} blocks", blocks.len());
    blocks
}

#[derive(Default)]
struct ParseState {
    inline_markdown: bool,

    // List state
    list: Option<List>,

    // Table state
    table: Option<TableBuilder>,
}

#[derive(Default)]
struct TableBuilder {
    headers: Option<Vec<Vec<Span>>>,
    rows: Vec<Vec<Vec<Span>>>,
    seen_separator: bool,
}

impl TableBuilder {
    fn separator(&mut self) {
        if self.seen_separator {
            log::debug!("ignoring repeated table separator");
            return;
        }
        self.seen_separator = true;
        // Only a separator directly under the first row makes that row the
        // header; otherwise the rows stay in the body in line order
        if self.headers.is_none() && self.rows.len() == 1 {
            self.headers = self.rows.pop();
        }
    }

    fn finish(self) -> Option<Block> {
        if self.headers.is_none() && self.rows.is_empty() {
            return None;
        }
        Some(Block::Table {
            headers: self.headers,
            rows: self.rows,
        })
    }
}

impl ParseState {
    fn spans(&self, text: &str) -> Vec<Span> {
        parse_spans(text, self.inline_markdown)
    }

    fn close_list(&mut self, blocks: &mut Vec<Block>) {
        if let Some(list) = self.list.take() {
            blocks.push(Block::List(list));
        }
    }

    fn close_table(&mut self, blocks: &mut Vec<Block>) {
        if let Some(block) = self.table.take().and_then(TableBuilder::finish) {
            blocks.push(block);
        }
    }

    fn close_containers(&mut self, blocks: &mut Vec<Block>) {
        self.close_list(blocks);
        self.close_table(blocks);
    }
}

fn process_line(line: Line, state: &mut ParseState, blocks: &mut Vec<Block>) {
    match line {
        Line::ListItem(text) => {
            state.close_table(blocks);
            let content = state.spans(&text);
            state
                .list
                .get_or_insert_with(List::default)
                .items
                .push(ListItem { content });
        }

        Line::TableRow(cells) => {
            state.close_list(blocks);
            let row = cells.iter().map(|cell| state.spans(cell)).collect();
            state.table.get_or_insert_with(TableBuilder::default).rows.push(row);
        }
        Line::TableSeparator => {
            state.close_list(blocks);
            state
                .table
                .get_or_insert_with(TableBuilder::default)
                .separator();
        }

        Line::Heading { level, text } => {
            state.close_containers(blocks);
            blocks.push(Block::Heading {
                level,
                content: state.spans(&text),
            });
        }
        Line::Callout { kind, label, items } => {
            state.close_containers(blocks);
            let items = items.iter().map(|item| state.spans(item)).collect();
            blocks.push(Block::Callout { kind, label, items });
        }
        Line::Paragraph(text) => {
            state.close_containers(blocks);
            blocks.push(Block::Paragraph {
                content: state.spans(&text),
            });
        }
    }
}
