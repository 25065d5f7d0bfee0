//! NEC infrared remote as a walker keypad
//!
//! Data words arrive as `0xAAAADDNN` (16 bit address, data, inverted data)
//! from an NEC receiver. Only address and data select the command.

use crate::key::Key;
use crate::keypad::KeyMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IrCommand {
    N0,
    N1,
    N2,
    N3,
    N4,
    N5,
    N6,
    N7,
    N8,
    N9,

    Ok,

    Up,
    Down,
    Left,
    Right,

    Home,
    Back,
    Menu,
    Click,

    Mute,
    Backspace,
    Power,

    Red,
    Green,
    Yellow,
    Blue,

    // second row of the small remote
    PowerAlt,
    Set,
    TvIn,
    VolDown,
    VolUp,

    Unknown,
}

/// Address and data (`0xAAAADD`) of each key of the remote.
static CODES: &[(u32, IrCommand)] = &[
    (0x807F02, IrCommand::Power),
    (0x807FAA, IrCommand::PowerAlt),
    (0x807F9A, IrCommand::Set),
    (0x807F1A, IrCommand::TvIn),
    (0x807FEA, IrCommand::VolDown),
    (0x807F6A, IrCommand::VolUp),
    (0x807FC2, IrCommand::Red),
    (0x807FF0, IrCommand::Green),
    (0x807F08, IrCommand::Yellow),
    (0x807F18, IrCommand::Blue),
    (0x807F88, IrCommand::Home),
    (0x807F98, IrCommand::Back),
    (0x807F32, IrCommand::Menu),
    (0x807F00, IrCommand::Click),
    (0x807FC8, IrCommand::Ok),
    (0x807F68, IrCommand::Up),
    (0x807F58, IrCommand::Down),
    (0x807F8A, IrCommand::Left),
    (0x807F0A, IrCommand::Right),
    (0x807F80, IrCommand::N0),
    (0x807F72, IrCommand::N1),
    (0x807FB0, IrCommand::N2),
    (0x807F30, IrCommand::N3),
    (0x807F52, IrCommand::N4),
    (0x807F90, IrCommand::N5),
    (0x807F10, IrCommand::N6),
    (0x807F62, IrCommand::N7),
    (0x807FA0, IrCommand::N8),
    (0x807F20, IrCommand::N9),
    (0x807F82, IrCommand::Mute),
    (0x807F42, IrCommand::Backspace),
];

pub fn translate(data: u32) -> IrCommand {
    let code = data >> 8;
    CODES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, command)| *command)
        .unwrap_or(IrCommand::Unknown)
}

impl From<IrCommand> for Key {
    fn from(command: IrCommand) -> Key {
        match command {
            IrCommand::Up | IrCommand::Back => Key::Up,
            IrCommand::Down => Key::Down,
            IrCommand::Left => Key::Left,
            IrCommand::Right => Key::Right,
            IrCommand::Ok | IrCommand::Click => Key::Select,
            _ => Key::None,
        }
    }
}

/// Drives the walker from NEC data words.
#[derive(Clone, Copy, Debug, Default)]
pub struct IrRemote;

impl KeyMap for IrRemote {
    type Code = u32;

    fn key(&self, data: u32) -> Key {
        translate(data).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::TextBuffer;
    use crate::keypad::KeypadController;
    use crate::menu::Item;
    use crate::walker::Walker;

    fn frame(code: u32) -> u32 {
        let data = code & 0xFF;
        (code << 8) | (!data & 0xFF)
    }

    #[test]
    fn translates_known_frames() {
        assert_eq!(translate(frame(0x807F68)), IrCommand::Up);
        assert_eq!(translate(frame(0x807FC8)), IrCommand::Ok);
        assert_eq!(translate(frame(0x807F20)), IrCommand::N9);
        assert_eq!(translate(0x1234_5678), IrCommand::Unknown);
    }

    #[test]
    fn arrows_and_ok_become_keys() {
        assert_eq!(Key::from(IrCommand::Right), Key::Right);
        assert_eq!(Key::from(IrCommand::Click), Key::Select);
        assert_eq!(Key::from(IrCommand::Back), Key::Up);
        assert_eq!(Key::from(IrCommand::Red), Key::None);
    }

    #[test]
    fn remote_walks_the_menu() {
        let x = Item::symbol(b"X");
        let inner_items = [&x];
        let inner = Item::list(b"Inner", &inner_items);
        let a = Item::symbol(b"A");
        let items = [&a, &inner];
        let root = Item::list(b"Root", &items);
        let walker = Walker::<_>::new(&root, TextBuffer::<16, 2>::new());
        let mut remote = KeypadController::new(walker, IrRemote);

        remote.on_key_down(frame(0x807F0A)).unwrap();
        remote.on_key_down(frame(0x807F58)).unwrap();
        assert_eq!(remote.walker().depth(), 2);
        assert_eq!(remote.walker().display().line(0), "Inner");

        assert!(!remote.on_key_down(frame(0x807F02)).unwrap());
        remote.on_key_down(frame(0x807F98)).unwrap();
        assert_eq!(remote.walker().depth(), 1);
    }
}
