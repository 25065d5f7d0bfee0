//! Menus for character displays walked with a five key keypad
//!
//! The menu tree is read-only data, usually `static`s built with the
//! [`menu::Item`] constructors. A [`walker::Walker`] keeps the little
//! mutable state needed to browse it and edit the variables it points to,
//! and renders onto a [`display::Display`].
#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod display;
pub mod ir_remote;
pub mod key;
pub mod keypad;
pub mod menu;
pub mod render;
pub mod validate;
pub mod walker;

pub use key::Key;
pub use menu::{Action, Item, ItemType};
pub use walker::{Mode, Walker};
