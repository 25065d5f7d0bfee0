//! Keypad side of the walker
//!
//! A [`KeyMap`] turns whatever a keypad reports into one of the walker's
//! keys, the [`KeypadController`] forwards the result. [`AnalogKeypad`]
//! reads the resistor ladder keypad of the common LCD keypad shield.

use embedded_hal::adc::{Channel, OneShot};
use log::trace;

use crate::display::Display;
use crate::key::Key;
use crate::walker::{Walker, DEFAULT_DEPTH};

/// Translation of hardware key codes to walker keys.
pub trait KeyMap {
    type Code;

    fn key(&self, code: Self::Code) -> Key;
}

/// The LCD keypad shield numbers its keys like [`Key`].
#[derive(Clone, Copy, Debug, Default)]
pub struct LcdKeypad;

impl KeyMap for LcdKeypad {
    type Code = u8;

    fn key(&self, code: u8) -> Key {
        Key::from(code)
    }
}

/// Adapts key down events of a keypad to a walker.
pub struct KeypadController<'a, D, M, const DEPTH: usize = DEFAULT_DEPTH> {
    walker: Walker<'a, D, DEPTH>,
    map: M,
}

impl<'a, D, M, const DEPTH: usize> KeypadController<'a, D, M, DEPTH>
where
    D: Display,
    M: KeyMap,
{
    pub fn new(walker: Walker<'a, D, DEPTH>, map: M) -> Self {
        KeypadController { walker, map }
    }

    pub fn begin(&mut self) -> Result<(), D::Error> {
        self.walker.begin()
    }

    /// Forwards the key behind `code`, returns whether the walker rendered.
    pub fn on_key_down(&mut self, code: M::Code) -> Result<bool, D::Error> {
        let key = self.map.key(code);
        self.walker.on_key_down(key)
    }

    pub fn walker(&self) -> &Walker<'a, D, DEPTH> {
        &self.walker
    }

    pub fn walker_mut(&mut self) -> &mut Walker<'a, D, DEPTH> {
        &mut self.walker
    }

    pub fn into_walker(self) -> Walker<'a, D, DEPTH> {
        self.walker
    }
}

/// Lowest sample of each key code, indexed by code, in descending order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Thresholds(pub [u16; 6]);

impl Thresholds {
    /// Resistor ladder of the LCD keypad shield read with a 10 bit converter.
    pub const TEN_BIT: Thresholds = Thresholds([1000, 700, 400, 300, 100, 0]);

    /// Same ladder for a converter of `bits` resolution (10..=16).
    pub fn scaled(self, bits: u8) -> Self {
        let shift = bits.saturating_sub(10).min(6);
        let mut levels = self.0;
        for level in levels.iter_mut() {
            *level = (u32::from(*level) << shift).min(u32::from(u16::MAX)) as u16;
        }
        Thresholds(levels)
    }

    pub fn decode(&self, sample: u16) -> u8 {
        self.0
            .iter()
            .position(|&level| sample >= level)
            .map(|code| code as u8)
            .unwrap_or(Key::None as u8)
    }
}

/// Keypad on a single analog input. Reports a key once when it goes down,
/// releases and repeated samples of the same key are swallowed.
pub struct AnalogKeypad<PIN> {
    pin: PIN,
    thresholds: Thresholds,
    pressed: u8,
}

impl<PIN> AnalogKeypad<PIN> {
    pub fn new(pin: PIN) -> Self {
        Self::with_thresholds(pin, Thresholds::TEN_BIT)
    }

    pub fn with_thresholds(pin: PIN, thresholds: Thresholds) -> Self {
        AnalogKeypad {
            pin,
            thresholds,
            pressed: Key::None as u8,
        }
    }

    /// Samples the keypad. Returns the code of a newly pressed key, or
    /// `WouldBlock` while nothing new happened.
    pub fn read<ADC, A>(&mut self, adc: &mut A) -> nb::Result<u8, A::Error>
    where
        PIN: Channel<ADC>,
        A: OneShot<ADC, u16, PIN>,
    {
        let sample = adc.read(&mut self.pin)?;
        let code = self.thresholds.decode(sample);
        if code == self.pressed {
            return Err(nb::Error::WouldBlock);
        }
        self.pressed = code;
        if code == Key::None as u8 {
            return Err(nb::Error::WouldBlock);
        }
        trace!("keypad sample {} -> key {}", sample, code);
        Ok(code)
    }

    pub fn release(self) -> PIN {
        self.pin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::TextBuffer;
    use crate::menu::Item;

    struct Ladder;
    struct Button;

    impl Channel<Ladder> for Button {
        type ID = u8;

        fn channel() -> u8 {
            0
        }
    }

    struct Samples<'s> {
        values: &'s [u16],
        next: usize,
    }

    impl OneShot<Ladder, u16, Button> for Samples<'_> {
        type Error = ();

        fn read(&mut self, _pin: &mut Button) -> nb::Result<u16, ()> {
            let value = self.values.get(self.next).copied().ok_or(nb::Error::Other(()))?;
            self.next += 1;
            Ok(value)
        }
    }

    fn presses(values: &[u16]) -> Vec<u8> {
        let mut adc = Samples { values, next: 0 };
        let mut keypad = AnalogKeypad::new(Button);
        let mut codes = Vec::new();
        loop {
            match keypad.read::<Ladder, _>(&mut adc) {
                Ok(code) => codes.push(code),
                Err(nb::Error::WouldBlock) => {}
                Err(nb::Error::Other(())) => return codes,
            }
        }
    }

    #[test]
    fn decodes_the_shield_ladder() {
        let ladder = Thresholds::TEN_BIT;
        assert_eq!(ladder.decode(1023), Key::None as u8);
        assert_eq!(ladder.decode(741), Key::Select as u8);
        assert_eq!(ladder.decode(503), Key::Left as u8);
        assert_eq!(ladder.decode(329), Key::Down as u8);
        assert_eq!(ladder.decode(144), Key::Up as u8);
        assert_eq!(ladder.decode(0), Key::Right as u8);
    }

    #[test]
    fn scales_to_wider_converters() {
        let ladder = Thresholds::TEN_BIT.scaled(12);
        assert_eq!(ladder, Thresholds([4000, 2800, 1600, 1200, 400, 0]));
        assert_eq!(ladder.decode(4095), Key::None as u8);
        assert_eq!(ladder.decode(580), Key::Up as u8);
        assert_eq!(Thresholds::TEN_BIT.scaled(8), Thresholds::TEN_BIT);
    }

    #[test]
    fn reports_each_press_once() {
        let codes = presses(&[1023, 0, 2, 1, 1023, 1023, 0, 741, 741, 1023]);
        assert_eq!(codes, vec![5, 5, 1]);
    }

    #[test]
    fn release_is_silent() {
        assert!(presses(&[1023, 1020, 1023]).is_empty());
    }

    #[test]
    fn controller_maps_codes_to_keys() {
        let a = Item::symbol(b"A");
        let b = Item::symbol(b"B");
        let items = [&a, &b];
        let root = Item::list(b"Root", &items);
        let walker = Walker::<_>::new(&root, TextBuffer::<16, 2>::new());
        let mut controller = KeypadController::new(walker, LcdKeypad);
        controller.begin().unwrap();

        assert!(controller.on_key_down(Key::Right as u8).unwrap());
        assert_eq!(controller.walker().index(), 1);
        assert_eq!(controller.walker().display().line(1), ">B");
        assert!(!controller.on_key_down(42).unwrap());
        assert!(!controller.on_key_down(0).unwrap());
        assert_eq!(controller.walker().index(), 1);
    }
}
