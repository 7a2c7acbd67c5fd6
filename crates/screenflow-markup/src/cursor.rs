use crate::error::ParseError;

/// Character cursor over a source string that tracks line and column.
pub(crate) struct Cursor<'s> {
    src: &'s str,
    pos: usize,
    line: usize,
    col: usize,
}

impl<'s> Cursor<'s> {
    pub(crate) fn new(src: &'s str) -> Self {
        Self { src, pos: 0, line: 1, col: 1 }
    }

    pub(crate) fn rest(&self) -> &'s str {
        &self.src[self.pos..]
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    pub(crate) fn position(&self) -> (usize, usize) {
        (self.line, self.col)
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub(crate) fn starts_with(&self, s: &str) -> bool {
        self.rest().starts_with(s)
    }

    pub(crate) fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    /// Consumes `s` if the input starts with it.
    pub(crate) fn eat(&mut self, s: &str) -> bool {
        if !self.starts_with(s) {
            return false;
        }
        for _ in s.chars() {
            self.advance();
        }
        true
    }

    pub(crate) fn expect(&mut self, s: &str) -> Result<(), ParseError> {
        if self.eat(s) {
            Ok(())
        } else {
            Err(self.err(format!("expected `{s}`")))
        }
    }

    pub(crate) fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    /// Consumes characters while `pred` holds and returns them.
    pub(crate) fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'s str {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if pred(c)) {
            self.advance();
        }
        &self.src[start..self.pos]
    }

    /// Consumes up to and including `end`; returns the text before it.
    /// `what` names the construct in the error for a missing terminator.
    pub(crate) fn take_until(&mut self, end: &str, what: &str) -> Result<&'s str, ParseError> {
        let (line, col) = self.position();
        let start = self.pos;
        loop {
            if self.starts_with(end) {
                let text = &self.src[start..self.pos];
                self.eat(end);
                return Ok(text);
            }
            if self.advance().is_none() {
                return Err(ParseError::new(format!("unterminated {what}"), line, col));
            }
        }
    }

    pub(crate) fn err(&self, msg: impl Into<String>) -> ParseError {
        ParseError::new(msg, self.line, self.col)
    }
}
