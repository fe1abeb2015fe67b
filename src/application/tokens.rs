//! Character and word reading within one line, and age literal parsing.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::{Age, AgeOrRange, AgeRange, DomainError};

/// Forward-only reader over the text of a single line.
#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> LineCursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// Byte offset of the next unread character.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    pub fn skip_whitespace(&mut self) {
        self.read_while(char::is_whitespace);
    }

    /// Consume characters while `pred` holds and return them.
    pub fn read_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        &self.text[start..self.pos]
    }

    /// Next whitespace-delimited word, or `None` at end of line.
    pub fn read_word(&mut self) -> Option<&'a str> {
        self.skip_whitespace();
        let word = self.read_while(|c| !c.is_whitespace());
        (!word.is_empty()).then_some(word)
    }

    /// Unread text with surrounding whitespace removed.
    pub fn rest(&self) -> &'a str {
        self.text[self.pos..].trim()
    }

    pub fn is_exhausted(&self) -> bool {
        self.rest().is_empty()
    }

    /// Text consumed since byte offset `start`.
    pub fn consumed_since(&self, start: usize) -> &'a str {
        &self.text[start..self.pos]
    }
}

fn age_range_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\d+)-(\d+)$").expect("valid age range pattern"))
}

/// Parse a bare non-negative integer age.
pub fn parse_age(word: &str) -> Result<Age, DomainError> {
    parse_digits(word, word)
}

/// Parse `<age>` or `<start>-<end>`.
pub fn parse_age_or_range(word: &str) -> Result<AgeOrRange, DomainError> {
    match age_range_pattern().captures(word) {
        Some(caps) => {
            let start = parse_digits(&caps[1], word)?;
            let end = parse_digits(&caps[2], word)?;
            Ok(AgeOrRange::Range(AgeRange::new(start, end)?))
        }
        None => parse_age(word).map(AgeOrRange::Age),
    }
}

fn parse_digits(digits: &str, word: &str) -> Result<Age, DomainError> {
    let invalid = || DomainError::InvalidAge {
        text: word.to_string(),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    digits.parse::<Age>().map_err(|_| invalid())
}
