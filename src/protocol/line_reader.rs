#[derive(Debug, PartialEq, Eq)]
pub enum LineReadEvent<'a> {
    None,
    Complete(&'a [u8]),
    /// Emitted once per overlong line; the rest of it is dropped.
    Overflow,
}

/// Accumulates bytes into CR/LF terminated lines of at most `N` bytes.
pub struct LineReader<const N: usize> {
    line_buf: [u8; N],
    line_len: usize,
    overflowed: bool,
}

impl<const N: usize> Default for LineReader<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> LineReader<N> {
    pub const fn new() -> Self {
        Self {
            line_buf: [0; N],
            line_len: 0,
            overflowed: false,
        }
    }

    pub fn push_byte(&mut self, byte: u8) -> LineReadEvent<'_> {
        if byte == b'\r' || byte == b'\n' {
            if self.overflowed {
                self.overflowed = false;
                return LineReadEvent::None;
            }
            if self.line_len == 0 {
                return LineReadEvent::None;
            }
            let complete_len = self.line_len;
            self.line_len = 0;
            return LineReadEvent::Complete(&self.line_buf[..complete_len]);
        }

        if self.overflowed {
            return LineReadEvent::None;
        }

        if self.line_len < N {
            self.line_buf[self.line_len] = byte;
            self.line_len += 1;
            return LineReadEvent::None;
        }

        self.line_len = 0;
        self.overflowed = true;
        LineReadEvent::Overflow
    }

    pub fn clear(&mut self) {
        self.line_len = 0;
        self.overflowed = false;
    }
}
