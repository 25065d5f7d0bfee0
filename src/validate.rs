//! Authoring time checks of a menu tree
//!
//! The walker silently absorbs a badly authored tree (it never enters an
//! empty or too deep list). Run [`validate`] from a test or at start-up to
//! find those defects instead.

use core::ptr;

use log::debug;
use thiserror::Error;

use crate::menu::{Item, Kind, Name, BITSET_CAPACITY};

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ModelError<'a> {
    #[error("root `{0}` is not an item list")]
    RootNotList(Name<'a>),
    #[error("item list `{0}` has no entries")]
    EmptyList(Name<'a>),
    #[error("`{0}` has no symbols")]
    NoSymbols(Name<'a>),
    #[error("symbol `{symbol}` of `{item}` is not a plain item")]
    NotASymbol { item: Name<'a>, symbol: Name<'a> },
    #[error("bitset `{name}` has {count} symbols, at most {} fit", BITSET_CAPACITY)]
    TooManyBits { name: Name<'a>, count: usize },
    #[error("range `{name}` is empty: {low} > {high}")]
    EmptyRange { name: Name<'a>, low: i16, high: i16 },
    #[error("value {value} of `{name}` is out of its domain")]
    ValueOutOfRange { name: Name<'a>, value: i32 },
    #[error("item list `{name}` is nested {depth} deep, the walker reaches {max_depth}")]
    TooDeep {
        name: Name<'a>,
        depth: usize,
        max_depth: usize,
    },
    #[error("item list `{0}` contains itself")]
    Cycle(Name<'a>),
}

/// What a valid tree is made of.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    /// every item reachable from the root, enumeration symbols excluded
    pub items: usize,
    pub lists: usize,
    /// deepest list nesting, the root counts as 1
    pub depth: usize,
}

/// Lists on the way from the root to the list being checked.
struct Path<'p, 'a> {
    list: &'a Item<'a>,
    parent: Option<&'p Path<'p, 'a>>,
}

impl<'p, 'a> Path<'p, 'a> {
    fn contains(&self, item: &Item<'a>) -> bool {
        let mut path = Some(self);
        while let Some(step) = path {
            if ptr::eq(step.list, item) {
                return true;
            }
            path = step.parent;
        }
        false
    }
}

/// Checks the tree under `root` for a walker with a path stack of
/// `max_depth` lists. Reports the first defect found, depth first.
pub fn validate<'a>(root: &'a Item<'a>, max_depth: usize) -> Result<Summary, ModelError<'a>> {
    let items = match root.kind {
        Kind::List(items) => items,
        _ => return Err(ModelError::RootNotList(Name(root.name))),
    };
    let mut summary = Summary {
        items: 1,
        lists: 0,
        depth: 0,
    };
    check_list(root, items, None, 1, max_depth, &mut summary)?;
    debug!(
        "menu {} valid: {} items, {} lists, depth {}",
        Name(root.name),
        summary.items,
        summary.lists,
        summary.depth
    );
    Ok(summary)
}

fn check_list<'a>(
    list: &'a Item<'a>,
    items: &'a [&'a Item<'a>],
    parent: Option<&Path<'_, 'a>>,
    depth: usize,
    max_depth: usize,
    summary: &mut Summary,
) -> Result<(), ModelError<'a>> {
    if let Some(parent) = parent {
        if parent.contains(list) {
            return Err(ModelError::Cycle(Name(list.name)));
        }
    }
    if depth > max_depth {
        return Err(ModelError::TooDeep {
            name: Name(list.name),
            depth,
            max_depth,
        });
    }
    if items.is_empty() {
        return Err(ModelError::EmptyList(Name(list.name)));
    }
    summary.lists += 1;
    summary.depth = summary.depth.max(depth);

    let path = Path { list, parent };
    for &item in items {
        summary.items += 1;
        check_item(item, &path, depth, max_depth, summary)?;
    }
    Ok(())
}

fn check_item<'a>(
    item: &'a Item<'a>,
    path: &Path<'_, 'a>,
    depth: usize,
    max_depth: usize,
    summary: &mut Summary,
) -> Result<(), ModelError<'a>> {
    let name = Name(item.name);
    match item.kind {
        Kind::List(items) => check_list(item, items, Some(path), depth + 1, max_depth, summary)?,
        Kind::Enum(choice) => {
            check_symbols(item, choice.symbols)?;
            if choice.value() as usize >= choice.symbols.len() {
                return Err(ModelError::ValueOutOfRange {
                    name,
                    value: choice.value() as i32,
                });
            }
        }
        Kind::Bitset(choice) => {
            check_symbols(item, choice.symbols)?;
            let count = choice.symbols.len();
            if count > BITSET_CAPACITY {
                return Err(ModelError::TooManyBits { name, count });
            }
            if count < BITSET_CAPACITY && choice.value() >> count != 0 {
                return Err(ModelError::ValueOutOfRange {
                    name,
                    value: choice.value() as i32,
                });
            }
        }
        Kind::Range(bounds) => {
            if bounds.low > bounds.high {
                return Err(ModelError::EmptyRange {
                    name,
                    low: bounds.low,
                    high: bounds.high,
                });
            }
            if !bounds.contains(bounds.value()) {
                return Err(ModelError::ValueOutOfRange {
                    name,
                    value: bounds.value() as i32,
                });
            }
        }
        Kind::Symbol | Kind::Action(_) => {}
    }
    Ok(())
}

fn check_symbols<'a>(item: &'a Item<'a>, symbols: &'a [&'a Item<'a>]) -> Result<(), ModelError<'a>> {
    if symbols.is_empty() {
        return Err(ModelError::NoSymbols(Name(item.name)));
    }
    match symbols.iter().find(|symbol| !matches!(symbol.kind, Kind::Symbol)) {
        Some(symbol) => Err(ModelError::NotASymbol {
            item: Name(item.name),
            symbol: Name(symbol.name),
        }),
        None => Ok(()),
    }
}
