//! Newline-delimited text lists (taunts, confirm prompts).

/// Split a text file into trimmed lines, dropping blanks and `#` comments.
pub fn parse_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// A cyclic list of lines that can be swapped out until first use.
#[derive(Clone, Debug, Default)]
pub struct LineDeck {
    lines: Vec<String>,
    index: usize,
    used: bool,
}

impl LineDeck {
    pub fn new(lines: Vec<String>) -> Self {
        Self {
            lines,
            index: 0,
            used: false,
        }
    }

    /// Deck with a fallback line when `lines` is empty.
    pub fn with_fallback(lines: Vec<String>, fallback: &str) -> Self {
        if lines.is_empty() {
            Self::new(vec![fallback.to_string()])
        } else {
            Self::new(lines)
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn used(&self) -> bool {
        self.used
    }

    pub fn get(&self, i: usize) -> Option<&str> {
        self.lines.get(i).map(String::as_str)
    }

    /// Advance cyclically and return the new line.
    pub fn advance(&mut self) -> Option<&str> {
        if self.lines.is_empty() {
            return None;
        }
        self.used = true;
        self.index = (self.index + 1) % self.lines.len();
        self.lines.get(self.index).map(String::as_str)
    }

    pub fn mark_used(&mut self) {
        self.used = true;
    }

    /// Replace the lines unless the deck has been used or `lines` is empty.
    /// Returns whether the replacement happened.
    pub fn override_lines(&mut self, lines: Vec<String>) -> bool {
        if self.used || lines.is_empty() {
            return false;
        }
        self.lines = lines;
        self.index = 0;
        true
    }
}
