//! Projection of the walker state onto a character display
//!
//! With two or more rows the first row names the active list and the rest
//! show a window of its items that keeps the focus visible. Every row is
//! written padded to the full width, so only the initial frame needs a clear.

use crate::display::{fmt_i16, Display, Line, MAX_COLUMNS};
use crate::menu::{Item, Kind};
use crate::walker::Mode;

/// Display geometry and marks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// characters per row, at most `MAX_COLUMNS` are used
    pub columns: u8,
    pub rows: u8,
    /// marks the focused item while browsing
    pub browse_mark: u8,
    /// marks the focused item while its value is edited
    pub edit_mark: u8,
}

impl Default for Config {
    /// 16x2 LCD keypad shield
    fn default() -> Self {
        Config {
            columns: 16,
            rows: 2,
            browse_mark: b'>',
            edit_mark: b'*',
        }
    }
}

/// Walker state as seen by the renderer.
#[derive(Clone, Copy, Debug)]
pub struct View<'a> {
    pub list: &'a Item<'a>,
    pub index: usize,
    pub bit: usize,
    pub mode: Mode,
}

pub fn render<D: Display>(display: &mut D, view: &View<'_>, config: &Config) -> Result<(), D::Error> {
    let columns = (config.columns as usize).min(MAX_COLUMNS);
    let mut row = 0u8;

    if config.rows > 1 {
        let mut title = Line::new();
        title.push(view.list.name);
        print_row(display, row, &title, columns)?;
        row += 1;
    }

    let items = view.list.items();
    let window = (config.rows - row) as usize;
    let start = (view.index + 1).saturating_sub(window);

    for index in start..start + window {
        let line = match items.get(index) {
            Some(item) => item_line(item, index == view.index, view, config, columns),
            None => Line::new(),
        };
        print_row(display, row, &line, columns)?;
        row += 1;
    }
    Ok(())
}

fn print_row<D: Display>(display: &mut D, row: u8, line: &Line, columns: usize) -> Result<(), D::Error> {
    let mut padded = *line;
    while padded.len() < columns {
        padded.push_char(b' ');
    }
    display.set_position(0, row)?;
    display.print(&padded.as_bytes()[..columns])
}

fn item_line(item: &Item<'_>, focused: bool, view: &View<'_>, config: &Config, columns: usize) -> Line {
    let mut head = Line::new();
    head.push_char(match (focused, view.mode) {
        (true, Mode::Browse) => config.browse_mark,
        (true, Mode::Edit) => config.edit_mark,
        (false, _) => b' ',
    });
    head.push(item.name);

    let bit = if focused { Some(view.bit) } else { None };
    let value = match value_text(item, bit) {
        Some(value) => value,
        None => return head,
    };
    head.push_char(b':');

    // the value is right aligned and wins over the name when space is short
    let keep = columns.saturating_sub(value.len()).max(1).min(head.len());
    let mut line = Line::new();
    line.push(&head.as_bytes()[..keep]);
    while line.len() + value.len() < columns {
        line.push_char(b' ');
    }
    line.push(value.as_bytes());
    line
}

fn value_text(item: &Item<'_>, bit: Option<usize>) -> Option<Line> {
    let mut text = Line::new();
    match item.kind {
        Kind::Enum(choice) => {
            text.push(choice.selected().map(|symbol| symbol.name).unwrap_or(&b"?"[..]));
        }
        Kind::Range(bounds) => {
            let mut digits = [0u8; 6];
            text.push(fmt_i16(bounds.value(), &mut digits));
        }
        Kind::Bitset(choice) => {
            let bit = bit?;
            let symbol = choice.symbols.get(bit)?;
            text.push(if choice.is_set(bit) { b"[x]" } else { b"[ ]" });
            text.push(symbol.name);
        }
        _ => return None,
    }
    Some(text)
}
