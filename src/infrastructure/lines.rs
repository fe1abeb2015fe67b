//! In-memory line source for specification text.

use crate::infrastructure::traits::LineSource;

/// Start of a comment; the rest of the line is ignored.
pub const COMMENT_MARKER: &str = ">>";

/// Lines of a text with comments and blank lines removed.
///
/// Original line numbers are kept for diagnostics.
#[derive(Debug, Clone)]
pub struct TextLines {
    lines: Vec<(usize, String)>,
    index: usize,
    end_line: usize,
}

impl TextLines {
    pub fn new(text: &str) -> Self {
        let lines = text
            .lines()
            .enumerate()
            .filter_map(|(i, line)| {
                let content = strip_comment(line).trim_end();
                (!content.trim().is_empty()).then(|| (i + 1, content.to_string()))
            })
            .collect();
        Self {
            lines,
            index: 0,
            end_line: text.lines().count() + 1,
        }
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find(COMMENT_MARKER) {
        Some(pos) => &line[..pos],
        None => line,
    }
}

impl LineSource for TextLines {
    fn current_line(&self) -> Option<&str> {
        self.lines.get(self.index).map(|(_, line)| line.as_str())
    }

    fn line_number(&self) -> usize {
        self.lines
            .get(self.index)
            .map(|(number, _)| *number)
            .unwrap_or(self.end_line)
    }

    fn advance(&mut self) {
        if self.index < self.lines.len() {
            self.index += 1;
        }
    }
}
