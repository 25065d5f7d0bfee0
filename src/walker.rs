//! Menu walker
//!
//! Reacts to key events and keeps the path from the root list to the
//! active list on a fixed size stack. Each stack frame stores the index
//! that was active in its list, so going up returns to the same entry.
//!
//! Browsing:
//! * `Left`/`Right` move to the previous/next sibling, wrapping around
//! * `Down` enters a sub-menu, starts editing a variable or runs an action
//! * `Up` returns to the parent list
//! * `Select` toggles the bit under the bit cursor of a bitset
//!
//! Editing:
//! * enumeration: `Left`/`Right` cycle the symbols, any other key commits
//! * bitset: `Left`/`Right` move the bit cursor, `Select` toggles, `Up`/`Down` commit
//! * range: `Left`/`Right` step the value within its bounds, `Up`/`Down` commit

use core::convert::TryFrom;
use core::sync::atomic::Ordering;

use log::{debug, trace, warn};

use crate::display::Display;
use crate::key::Key;
use crate::menu::{Bounds, Choice, Item, Kind, Name, BITSET_CAPACITY};
use crate::render::{self, Config, View};

/// Path stack depth used when none is given.
pub const DEFAULT_DEPTH: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// moving between items
    Browse,
    /// changing the value of the focused variable
    Edit,
}

#[derive(Clone, Copy)]
struct Frame<'a> {
    list: &'a Item<'a>,
    index: usize,
}

pub struct Walker<'a, D, const DEPTH: usize = DEFAULT_DEPTH> {
    stack: [Frame<'a>; DEPTH],
    top: usize,
    bit: usize,
    mode: Mode,
    config: Config,
    display: D,
}

impl<'a, D, const DEPTH: usize> Walker<'a, D, DEPTH> {
    const HAS_ROOT_FRAME: () = assert!(DEPTH > 0, "walker needs room for the root list");

    /// Creates a walker positioned on the first item of `root`,
    /// rendering for the default 16x2 display.
    pub fn new(root: &'a Item<'a>, display: D) -> Self {
        Self::with_config(root, display, Config::default())
    }

    pub fn with_config(root: &'a Item<'a>, display: D, config: Config) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::HAS_ROOT_FRAME;

        Walker {
            stack: [Frame { list: root, index: 0 }; DEPTH],
            top: 0,
            bit: 0,
            mode: Mode::Browse,
            config,
            display,
        }
    }

    /// Number of lists on the path, the root included.
    pub fn depth(&self) -> usize {
        self.top + 1
    }

    /// Index of the focused item in the active list.
    pub fn index(&self) -> usize {
        self.stack[self.top].index
    }

    /// Bit cursor, meaningful while a bitset has the focus.
    pub fn bit_index(&self) -> usize {
        self.bit
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == Mode::Edit
    }

    pub fn active_list(&self) -> &'a Item<'a> {
        self.stack[self.top].list
    }

    /// Focused item, `None` only for an empty root list.
    pub fn focus(&self) -> Option<&'a Item<'a>> {
        self.active_list().items().get(self.index()).copied()
    }

    pub fn view(&self) -> View<'a> {
        View {
            list: self.active_list(),
            index: self.index(),
            bit: self.bit,
            mode: self.mode,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn into_display(self) -> D {
        self.display
    }

    /// Applies one key to the state, returns true if anything visible changed.
    fn step(&mut self, key: Key) -> bool {
        let focus = match self.focus() {
            Some(focus) => focus,
            None => return false,
        };
        trace!("key {:?} on {} in {:?}", key, Name(focus.name), self.mode);

        match self.mode {
            Mode::Browse => self.browse(focus, key),
            Mode::Edit => self.edit(focus, key),
        }
    }

    fn browse(&mut self, focus: &'a Item<'a>, key: Key) -> bool {
        match key {
            Key::Right => self.move_focus(|index, count| (index + 1) % count),
            Key::Left => self.move_focus(|index, count| (index + count - 1) % count),
            Key::Down => self.enter(focus),
            Key::Up => self.leave(),
            Key::Select => match focus.kind {
                Kind::Bitset(choice) => self.toggle(choice),
                _ => false,
            },
            Key::None => false,
        }
    }

    fn edit(&mut self, focus: &'a Item<'a>, key: Key) -> bool {
        match focus.kind {
            Kind::Enum(choice) => match key {
                Key::Right => cycle(choice, true),
                Key::Left => cycle(choice, false),
                Key::Up | Key::Down | Key::Select => self.commit(),
                Key::None => false,
            },
            Kind::Bitset(choice) => match key {
                Key::Right => self.move_bit(choice, |bit, count| (bit + 1) % count),
                Key::Left => self.move_bit(choice, |bit, count| (bit + count - 1) % count),
                Key::Select => self.toggle(choice),
                Key::Up | Key::Down => self.commit(),
                Key::None => false,
            },
            Kind::Range(bounds) => match key {
                Key::Right => adjust(bounds, 1),
                Key::Left => adjust(bounds, -1),
                Key::Up | Key::Down => self.commit(),
                Key::Select | Key::None => false,
            },
            // only variables are edited
            _ => self.commit(),
        }
    }

    fn move_focus(&mut self, next: fn(usize, usize) -> usize) -> bool {
        let count = self.active_list().items().len();
        let frame = &mut self.stack[self.top];
        if count == 0 {
            return false;
        }
        let index = next(frame.index, count);
        if index == frame.index {
            return false;
        }
        frame.index = index;
        self.bit = 0;
        true
    }

    fn enter(&mut self, focus: &'a Item<'a>) -> bool {
        match focus.kind {
            Kind::List(items) => {
                if items.is_empty() {
                    warn!("list {} is empty, not entered", Name(focus.name));
                    return false;
                }
                if self.top + 1 >= DEPTH {
                    warn!("path stack full at depth {}, {} not entered", DEPTH, Name(focus.name));
                    return false;
                }
                self.top += 1;
                self.stack[self.top] = Frame {
                    list: focus,
                    index: 0,
                };
                self.bit = 0;
                debug!("entered {} at depth {}", Name(focus.name), self.depth());
                true
            }
            Kind::Enum(_) | Kind::Bitset(_) | Kind::Range(_) => {
                self.mode = Mode::Edit;
                debug!("editing {}", Name(focus.name));
                true
            }
            Kind::Action(action) => {
                debug!("running action {}", Name(focus.name));
                action.run(focus)
            }
            Kind::Symbol => false,
        }
    }

    fn leave(&mut self) -> bool {
        if self.top == 0 {
            return false;
        }
        self.top -= 1;
        self.bit = 0;
        debug!("back to {} at depth {}", Name(self.active_list().name), self.depth());
        true
    }

    fn commit(&mut self) -> bool {
        self.mode = Mode::Browse;
        true
    }

    fn move_bit(&mut self, choice: Choice<'a>, next: fn(usize, usize) -> usize) -> bool {
        let count = choice.symbols.len().min(BITSET_CAPACITY);
        if count == 0 {
            return false;
        }
        let bit = next(self.bit % count, count);
        if bit == self.bit {
            return false;
        }
        self.bit = bit;
        true
    }

    fn toggle(&mut self, choice: Choice<'a>) -> bool {
        if self.bit >= choice.symbols.len().min(BITSET_CAPACITY) {
            return false;
        }
        let value = choice.value() ^ (1 << self.bit);
        choice.value.store(value, Ordering::Relaxed);
        true
    }
}

impl<'a, D: Display, const DEPTH: usize> Walker<'a, D, DEPTH> {
    /// Clears the display and prints the initial menu state.
    pub fn begin(&mut self) -> Result<(), D::Error> {
        self.display.clear()?;
        self.render()
    }

    /// Interprets one key and re-renders when the visible state changed.
    /// Returns whether it rendered.
    pub fn on_key_down(&mut self, key: Key) -> Result<bool, D::Error> {
        let changed = self.step(key);
        if changed {
            self.render()?;
        }
        Ok(changed)
    }

    pub fn render(&mut self) -> Result<(), D::Error> {
        let view = self.view();
        render::render(&mut self.display, &view, &self.config)
    }
}

/// Next or previous symbol of an enumeration, wrapping around.
fn cycle(choice: Choice<'_>, forward: bool) -> bool {
    let count = choice.symbols.len();
    if count == 0 {
        return false;
    }
    let value = choice.value();
    let current = value as usize % count;
    let next = if forward {
        (current + 1) % count
    } else {
        (current + count - 1) % count
    };
    match u16::try_from(next) {
        Ok(next) if next != value => {
            choice.value.store(next, Ordering::Relaxed);
            true
        }
        _ => false,
    }
}

/// Steps a range value, saturating at its bounds.
fn adjust(bounds: Bounds<'_>, delta: i16) -> bool {
    let value = bounds.value();
    let next = value.saturating_add(delta).max(bounds.low).min(bounds.high);
    if next == value {
        return false;
    }
    bounds.value.store(next, Ordering::Relaxed);
    true
}
