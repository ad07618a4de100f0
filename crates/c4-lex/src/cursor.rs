//! Byte cursor over the source buffer.
//!
//! The source language is byte-oriented (the original reads `char *p`
//! directly), so the cursor walks `&[u8]` rather than `char`s — there is no
//! UTF-8 decoding to get right, only line tracking for diagnostics and
//! source-listing mode.

pub struct Cursor<'a> {
    source: &'a [u8],
    pos: usize,
    line: u32,
    /// Start of the current line, for `-s` source-listing output.
    line_start: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a [u8]) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
            line_start: 0,
        }
    }

    pub fn current(&self) -> u8 {
        self.peek(0)
    }

    pub fn peek(&self, offset: usize) -> u8 {
        self.source.get(self.pos + offset).copied().unwrap_or(0)
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn advance(&mut self) {
        if self.is_at_end() {
            return;
        }
        if self.source[self.pos] == b'\n' {
            self.line += 1;
            self.line_start = self.pos + 1;
        }
        self.pos += 1;
    }

    pub fn bump(&mut self) -> u8 {
        let c = self.current();
        self.advance();
        c
    }

    pub fn match_byte(&mut self, expected: u8) -> bool {
        if self.current() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    /// The text of the current line, from its start up to (but not
    /// including) the newline that ends it — what `-s` mode echoes verbatim.
    pub fn current_line_text(&self) -> &'a [u8] {
        let end = self.source[self.line_start..]
            .iter()
            .position(|&b| b == b'\n')
            .map(|i| self.line_start + i)
            .unwrap_or(self.source.len());
        &self.source[self.line_start..end]
    }

    pub fn slice(&self, start: usize, end: usize) -> &'a [u8] {
        &self.source[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_line_number_across_newlines() {
        let mut c = Cursor::new(b"a\nb\nc");
        assert_eq!(c.line(), 1);
        c.advance(); // a
        c.advance(); // \n
        assert_eq!(c.line(), 2);
        c.advance(); // b
        c.advance(); // \n
        assert_eq!(c.line(), 3);
    }

    #[test]
    fn current_line_text_excludes_newline() {
        let mut c = Cursor::new(b"first\nsecond");
        for _ in 0..6 {
            c.advance();
        }
        assert_eq!(c.current_line_text(), b"second");
    }

    #[test]
    fn peek_past_end_is_nul() {
        let c = Cursor::new(b"a");
        assert_eq!(c.peek(5), 0);
    }
}
