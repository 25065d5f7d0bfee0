//! Read-only menu tree
//!
//! The whole tree is meant to be `static` data: nodes are built with the
//! `const fn` constructors below and only the value cells they point to
//! change at runtime.
//!
//! ```
//! use core::sync::atomic::{AtomicI16, AtomicU16};
//! use menu_walker::menu::Item;
//!
//! static MODE: AtomicU16 = AtomicU16::new(0);
//! static TARGET: AtomicI16 = AtomicI16::new(21);
//!
//! static NORMAL: Item = Item::symbol(b"Normal");
//! static ECO: Item = Item::symbol(b"Eco");
//! static MODE_ITEM: Item = Item::enumeration(b"Mode", &[&NORMAL, &ECO], &MODE);
//! static TARGET_ITEM: Item = Item::range(b"Target", 5, 30, &TARGET);
//! static ROOT: Item = Item::list(b"Heating", &[&MODE_ITEM, &TARGET_ITEM]);
//!
//! assert_eq!(ROOT.items().len(), 2);
//! ```

use core::fmt;
use core::sync::atomic::{AtomicI16, AtomicU16, Ordering};

/// Number of symbols a bitset cell can hold.
pub const BITSET_CAPACITY: usize = 16;

/// Item references making up a list or a symbol set.
pub type Items<'a> = &'a [&'a Item<'a>];

/// Type tag of a menu item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemType {
    /// plain item or enumeration symbol
    Item,
    /// sub-menu
    ItemList,
    /// one-of variable
    Enum,
    /// zero-or-many variable
    Bitset,
    /// bounded integer variable
    Range,
    /// triggerable operation
    Action,
}

/// Handler bound to an action item.
pub trait Action {
    /// Runs the action for the given item. Returns true when the walker
    /// should render the display afterwards.
    fn run(&self, item: &Item<'_>) -> bool;
}

impl<F> Action for F
where
    F: Fn(&Item<'_>) -> bool,
{
    fn run(&self, item: &Item<'_>) -> bool {
        self(item)
    }
}

/// Symbol list with the cell holding the selection.
/// For enumerations the cell is an index, for bitsets a bit vector.
#[derive(Clone, Copy)]
pub struct Choice<'a> {
    pub symbols: Items<'a>,
    pub value: &'a AtomicU16,
}

impl<'a> Choice<'a> {
    pub fn value(&self) -> u16 {
        self.value.load(Ordering::Relaxed)
    }

    /// The selected symbol of an enumeration, `None` if the cell is out of range.
    pub fn selected(&self) -> Option<&'a Item<'a>> {
        self.symbols.get(self.value() as usize).copied()
    }

    /// State of one bit of a bitset.
    pub fn is_set(&self, bit: usize) -> bool {
        bit < BITSET_CAPACITY && self.value() & (1 << bit) != 0
    }
}

/// Inclusive bounds with the cell holding the current value.
#[derive(Clone, Copy)]
pub struct Bounds<'a> {
    pub low: i16,
    pub high: i16,
    pub value: &'a AtomicI16,
}

impl<'a> Bounds<'a> {
    pub fn value(&self) -> i16 {
        self.value.load(Ordering::Relaxed)
    }

    pub fn contains(&self, value: i16) -> bool {
        self.low <= value && value <= self.high
    }
}

/// Variant specific part of an item.
#[derive(Clone, Copy)]
pub enum Kind<'a> {
    Symbol,
    List(Items<'a>),
    Enum(Choice<'a>),
    Bitset(Choice<'a>),
    Range(Bounds<'a>),
    Action(&'a (dyn Action + Sync)),
}

/// A menu node: display name and kind.
#[derive(Clone, Copy)]
pub struct Item<'a> {
    pub name: &'a [u8],
    pub kind: Kind<'a>,
}

impl<'a> Item<'a> {
    pub const fn symbol(name: &'a [u8]) -> Self {
        Item {
            name,
            kind: Kind::Symbol,
        }
    }

    pub const fn list(name: &'a [u8], items: Items<'a>) -> Self {
        Item {
            name,
            kind: Kind::List(items),
        }
    }

    /// One-of variable: `value` holds the index of the selected symbol.
    pub const fn enumeration(name: &'a [u8], symbols: Items<'a>, value: &'a AtomicU16) -> Self {
        Item {
            name,
            kind: Kind::Enum(Choice { symbols, value }),
        }
    }

    /// Zero-or-many variable: bit `n` of `value` belongs to `symbols[n]`.
    pub const fn bitset(name: &'a [u8], symbols: Items<'a>, value: &'a AtomicU16) -> Self {
        Item {
            name,
            kind: Kind::Bitset(Choice { symbols, value }),
        }
    }

    pub const fn range(name: &'a [u8], low: i16, high: i16, value: &'a AtomicI16) -> Self {
        Item {
            name,
            kind: Kind::Range(Bounds { low, high, value }),
        }
    }

    pub const fn action(name: &'a [u8], handler: &'a (dyn Action + Sync)) -> Self {
        Item {
            name,
            kind: Kind::Action(handler),
        }
    }

    pub fn item_type(&self) -> ItemType {
        match self.kind {
            Kind::Symbol => ItemType::Item,
            Kind::List(_) => ItemType::ItemList,
            Kind::Enum(_) => ItemType::Enum,
            Kind::Bitset(_) => ItemType::Bitset,
            Kind::Range(_) => ItemType::Range,
            Kind::Action(_) => ItemType::Action,
        }
    }

    /// Entries of a list item, empty for any other kind.
    pub fn items(&self) -> Items<'a> {
        match self.kind {
            Kind::List(items) => items,
            _ => &[],
        }
    }

    /// True for the kinds edited in place (enum, bitset, range).
    pub fn is_variable(&self) -> bool {
        match self.kind {
            Kind::Enum(_) | Kind::Bitset(_) | Kind::Range(_) => true,
            _ => false,
        }
    }
}

impl fmt::Debug for Item<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("name", &Name(self.name))
            .field("type", &self.item_type())
            .finish()
    }
}

/// Prints a byte string name, used for logging and error messages.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Name<'a>(pub &'a [u8]);

impl fmt::Display for Name<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &c in self.0 {
            if c.is_ascii_graphic() || c == b' ' {
                fmt::Write::write_char(f, c as char)?;
            } else {
                write!(f, "\\x{:02x}", c)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Name<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;

    static HITS: AtomicU32 = AtomicU32::new(0);

    fn count_hit(_item: &Item<'_>) -> bool {
        HITS.fetch_add(1, Ordering::Relaxed);
        false
    }

    static DAYS: AtomicU16 = AtomicU16::new(0b101);
    static LEVEL: AtomicI16 = AtomicI16::new(3);
    static MON: Item = Item::symbol(b"Mon");
    static TUE: Item = Item::symbol(b"Tue");
    static WED: Item = Item::symbol(b"Wed");
    static DAY_ITEM: Item = Item::bitset(b"Days", &[&MON, &TUE, &WED], &DAYS);
    static LEVEL_ITEM: Item = Item::range(b"Level", 0, 9, &LEVEL);
    static COUNT: Item = Item::action(b"Count", &count_hit);
    static ROOT: Item = Item::list(b"Root", &[&DAY_ITEM, &LEVEL_ITEM, &COUNT]);

    #[test]
    fn type_tags_follow_kind() {
        assert_eq!(ROOT.item_type(), ItemType::ItemList);
        assert_eq!(MON.item_type(), ItemType::Item);
        assert_eq!(DAY_ITEM.item_type(), ItemType::Bitset);
        assert_eq!(LEVEL_ITEM.item_type(), ItemType::Range);
        assert_eq!(COUNT.item_type(), ItemType::Action);
        assert!(LEVEL_ITEM.is_variable());
        assert!(!COUNT.is_variable());
    }

    #[test]
    fn only_lists_have_items() {
        assert_eq!(ROOT.items().len(), 3);
        assert!(core::ptr::eq(ROOT.items()[1], &LEVEL_ITEM));
        assert!(MON.items().is_empty());
        assert!(DAY_ITEM.items().is_empty());
    }

    #[test]
    fn bitset_bits_read_from_cell() {
        if let Kind::Bitset(choice) = DAY_ITEM.kind {
            assert!(choice.is_set(0));
            assert!(!choice.is_set(1));
            assert!(choice.is_set(2));
            assert!(!choice.is_set(BITSET_CAPACITY));
        } else {
            panic!("not a bitset");
        }
    }

    #[test]
    fn functions_are_actions() {
        if let Kind::Action(handler) = COUNT.kind {
            let before = HITS.load(Ordering::Relaxed);
            assert!(!handler.run(&COUNT));
            assert_eq!(HITS.load(Ordering::Relaxed), before + 1);
        } else {
            panic!("not an action");
        }
    }

    #[test]
    fn enum_selection_out_of_range_is_none() {
        let value = AtomicU16::new(1);
        let symbols: [&Item; 2] = [&MON, &TUE];
        let item = Item::enumeration(b"Day", &symbols, &value);
        if let Kind::Enum(choice) = item.kind {
            assert_eq!(choice.selected().map(|s| s.name), Some(&b"Tue"[..]));
            value.store(7, Ordering::Relaxed);
            assert!(choice.selected().is_none());
        } else {
            panic!("not an enum");
        }
    }

    #[test]
    fn names_print_escaped() {
        assert_eq!(format!("{}", Name(b"Temp 1")), "Temp 1");
        assert_eq!(format!("{}", Name(b"\xdfC")), "\\xdfC");
        assert_eq!(format!("{:?}", MON), "Item { name: \"Mon\", type: Item }");
    }
}
