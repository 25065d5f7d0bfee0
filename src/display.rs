//! Character display seam and text formatting helpers

use core::convert::Infallible;

/// Widest character display the renderer lays out (HD44780 family limit).
pub const MAX_COLUMNS: usize = 40;

/// Character display driven by the walker. Positions are in characters.
pub trait Display {
    type Error;

    fn clear(&mut self) -> Result<(), Self::Error>;
    fn set_position(&mut self, column: u8, row: u8) -> Result<(), Self::Error>;
    fn print(&mut self, text: &[u8]) -> Result<(), Self::Error>;

    fn print_char(&mut self, c: u8) -> Result<(), Self::Error> {
        self.print(&[c])
    }
}

impl<D: Display> Display for &mut D {
    type Error = D::Error;

    fn clear(&mut self) -> Result<(), Self::Error> {
        (**self).clear()
    }

    fn set_position(&mut self, column: u8, row: u8) -> Result<(), Self::Error> {
        (**self).set_position(column, row)
    }

    fn print(&mut self, text: &[u8]) -> Result<(), Self::Error> {
        (**self).print(text)
    }

    fn print_char(&mut self, c: u8) -> Result<(), Self::Error> {
        (**self).print_char(c)
    }
}

/// In-memory display of `COLUMNS` x `ROWS` characters.
/// Text past the end of a row is dropped, nothing wraps.
pub struct TextBuffer<const COLUMNS: usize, const ROWS: usize> {
    cells: [[u8; COLUMNS]; ROWS],
    column: usize,
    row: usize,
}

impl<const COLUMNS: usize, const ROWS: usize> TextBuffer<COLUMNS, ROWS> {
    pub fn new() -> Self {
        TextBuffer {
            cells: [[b' '; COLUMNS]; ROWS],
            column: 0,
            row: 0,
        }
    }

    pub fn row(&self, row: usize) -> &[u8] {
        &self.cells[row]
    }

    /// Row content without trailing padding, `""` if it is not valid utf-8.
    pub fn line(&self, row: usize) -> &str {
        let text = core::str::from_utf8(&self.cells[row]).unwrap_or("");
        text.trim_end()
    }
}

impl<const COLUMNS: usize, const ROWS: usize> Default for TextBuffer<COLUMNS, ROWS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const COLUMNS: usize, const ROWS: usize> Display for TextBuffer<COLUMNS, ROWS> {
    type Error = Infallible;

    fn clear(&mut self) -> Result<(), Infallible> {
        self.cells = [[b' '; COLUMNS]; ROWS];
        self.column = 0;
        self.row = 0;
        Ok(())
    }

    fn set_position(&mut self, column: u8, row: u8) -> Result<(), Infallible> {
        self.column = column as usize;
        self.row = row as usize;
        Ok(())
    }

    fn print(&mut self, text: &[u8]) -> Result<(), Infallible> {
        if let Some(cells) = self.cells.get_mut(self.row) {
            for &c in text {
                if let Some(cell) = cells.get_mut(self.column) {
                    *cell = c;
                }
                self.column += 1;
            }
        }
        Ok(())
    }
}

/// Decimal text of a signed 16 bit value, written to the end of `text`.
pub fn fmt_i16(value: i16, text: &mut [u8; 6]) -> &[u8] {
    let mut n = value.unsigned_abs();
    let mut start = text.len();
    loop {
        start -= 1;
        text[start] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    if value < 0 {
        start -= 1;
        text[start] = b'-';
    }
    &text[start..]
}

/// Fixed capacity text line; writes past the capacity are dropped.
#[derive(Clone, Copy)]
pub struct Line {
    text: [u8; MAX_COLUMNS],
    len: usize,
}

impl Line {
    pub fn new() -> Self {
        Line {
            text: [b' '; MAX_COLUMNS],
            len: 0,
        }
    }

    pub fn push(&mut self, text: &[u8]) {
        let n = text.len().min(MAX_COLUMNS - self.len);
        self.text[self.len..self.len + n].copy_from_slice(&text[..n]);
        self.len += n;
    }

    pub fn push_char(&mut self, c: u8) {
        self.push(&[c]);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.text[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for Line {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_signed_values() {
        let mut text = [0u8; 6];
        assert_eq!(fmt_i16(0, &mut text), b"0");
        assert_eq!(fmt_i16(7, &mut text), b"7");
        assert_eq!(fmt_i16(-45, &mut text), b"-45");
        assert_eq!(fmt_i16(i16::MAX, &mut text), b"32767");
        assert_eq!(fmt_i16(i16::MIN, &mut text), b"-32768");
    }

    #[test]
    fn buffer_clips_at_row_end() {
        let mut lcd = TextBuffer::<8, 2>::new();
        lcd.set_position(5, 1).unwrap();
        lcd.print(b"abcdef").unwrap();
        assert_eq!(lcd.line(0), "");
        assert_eq!(lcd.line(1), "     abc");
        lcd.set_position(0, 7).unwrap();
        lcd.print(b"lost").unwrap();
        lcd.clear().unwrap();
        assert_eq!(lcd.row(1), b"        ");
    }

    #[test]
    fn print_char_goes_through_print() {
        let mut lcd = TextBuffer::<4, 1>::new();
        lcd.print_char(b'>').unwrap();
        lcd.print_char(b'x').unwrap();
        assert_eq!(lcd.line(0), ">x");
    }

    #[test]
    fn line_drops_overflow() {
        let mut line = Line::new();
        for _ in 0..MAX_COLUMNS {
            line.push_char(b'-');
        }
        line.push(b"more");
        assert_eq!(line.len(), MAX_COLUMNS);
        assert!(line.as_bytes().iter().all(|&c| c == b'-'));
    }
}
