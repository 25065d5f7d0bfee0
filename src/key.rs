/// Abstract keys understood by the walker. The numbering is the key map
/// of the LCD keypad shield.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Key {
    None = 0,
    Select = 1,
    Left = 2,
    Down = 3,
    Up = 4,
    Right = 5,
}

impl From<u8> for Key {
    fn from(code: u8) -> Self {
        match code {
            1 => Key::Select,
            2 => Key::Left,
            3 => Key::Down,
            4 => Key::Up,
            5 => Key::Right,
            _ => Key::None,
        }
    }
}
