//! Character cursor over an RTTTL song buffer.
//!
//! The buffer is immutable; all reading state lives in the cursor's index, so a cursor can
//! be cloned to look ahead without disturbing the original.

/// Read position inside an immutable character buffer
#[derive(Debug, Clone, Default)]
pub struct Cursor {
    chars: Vec<char>,
    position: usize,
}

impl Cursor {
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            position: 0,
        }
    }

    /// Index of the next unread character.
    pub fn position(&self) -> usize {
        self.position
    }

    /// True once every character has been consumed (the buffer terminator).
    pub fn is_at_end(&self) -> bool {
        self.position >= self.chars.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += 1;
        Some(c)
    }

    /// Consume `expected` if it is the next character.
    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Check whether the unread input begins with `prefix`.
    pub fn starts_with(&self, prefix: &str) -> bool {
        let mut rest = self.chars[self.position.min(self.chars.len())..].iter();
        prefix.chars().all(|c| rest.next() == Some(&c))
    }

    /// Skip `count` characters, stopping at the terminator.
    pub fn skip(&mut self, count: usize) {
        self.position = (self.position + count).min(self.chars.len());
    }

    /// Skip up to and including the first `target`. Lands on the terminator if absent.
    pub fn skip_past(&mut self, target: char) {
        while let Some(c) = self.advance() {
            if c == target {
                return;
            }
        }
    }

    /// Read a run of ASCII digits as a number. `None` if no digit is present.
    /// Overlong values saturate instead of wrapping.
    pub fn read_number(&mut self) -> Option<u32> {
        let mut value: Option<u32> = None;
        while let Some(digit) = self.peek().and_then(|c| c.to_digit(10)) {
            self.position += 1;
            value = Some(value.unwrap_or(0).saturating_mul(10).saturating_add(digit));
        }
        value
    }

    /// Read exactly one ASCII digit, if present.
    pub fn read_digit(&mut self) -> Option<u8> {
        let digit = self.peek().and_then(|c| c.to_digit(10))?;
        self.position += 1;
        Some(digit as u8)
    }
}
