//! Fixed-width command input buffer

/// Maximum number of characters the buffer holds
pub const MAX_LENGTH: usize = 10;

/// Accumulates typed characters until the command is committed.
///
/// Works on `char`s rather than bytes, so multi-byte characters are
/// appended and removed whole. Content is not validated here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    chars: Vec<char>,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self {
            chars: Vec::with_capacity(MAX_LENGTH),
        }
    }

    /// Append a character; silently dropped once the buffer is full
    pub fn append(&mut self, c: char) {
        if self.chars.len() < MAX_LENGTH {
            self.chars.push(c);
        }
    }

    /// Remove the last character, if any
    pub fn backspace(&mut self) {
        self.chars.pop();
    }

    /// Buffer contents right-padded with spaces to `MAX_LENGTH` characters
    pub fn current(&self) -> String {
        let mut out: String = self.chars.iter().collect();
        out.extend(std::iter::repeat(' ').take(MAX_LENGTH - self.chars.len()));
        out
    }

    /// Buffer contents without padding
    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn clear(&mut self) {
        self.chars.clear();
    }
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod input_tests;
