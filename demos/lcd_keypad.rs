//! Floor heating settings menu on a blue pill
//!
//! LCD keypad shield resistor ladder on PA0 (ADC1 channel 0).
//! The menu is printed to the debugger console through semihosting,
//! one row per line.
//!
//! Build with `--features board --target thumbv7m-none-eabi`.
//!
#![no_main]
#![no_std]

use panic_halt as _;

use core::fmt::Write;
use core::sync::atomic::{AtomicI16, AtomicU16, Ordering};

use cortex_m_rt::entry;
use cortex_m_semihosting::hio;
use embedded_hal::blocking::delay::DelayMs;
use menu_walker::{
    display::Display,
    keypad::{AnalogKeypad, KeypadController, LcdKeypad, Thresholds},
    menu::Item,
    validate::validate,
    walker::{Walker, DEFAULT_DEPTH},
};
use stm32f1xx_hal::{adc::Adc, delay::Delay, pac, prelude::*};

static MODE: AtomicU16 = AtomicU16::new(0);
static DAYS: AtomicU16 = AtomicU16::new(0b001_1111);
static TARGET: AtomicI16 = AtomicI16::new(21);
static ECO_OFFSET: AtomicI16 = AtomicI16::new(-2);
static BACKLIGHT: AtomicI16 = AtomicI16::new(20);

fn reset_defaults(_item: &Item<'_>) -> bool {
    MODE.store(0, Ordering::Relaxed);
    DAYS.store(0b001_1111, Ordering::Relaxed);
    TARGET.store(21, Ordering::Relaxed);
    ECO_OFFSET.store(-2, Ordering::Relaxed);
    BACKLIGHT.store(20, Ordering::Relaxed);
    true
}

static NORMAL: Item = Item::symbol(b"Normal");
static ECONOMY: Item = Item::symbol(b"Eco");
static PARTY: Item = Item::symbol(b"Party");
static AWAY: Item = Item::symbol(b"Tavol");

static MONDAY: Item = Item::symbol(b"Hetfo");
static TUESDAY: Item = Item::symbol(b"Kedd");
static WEDNESDAY: Item = Item::symbol(b"Szerda");
static THURSDAY: Item = Item::symbol(b"Csutortok");
static FRIDAY: Item = Item::symbol(b"Pentek");
static SATURDAY: Item = Item::symbol(b"Szombat");
static SUNDAY: Item = Item::symbol(b"Vasarnap");

static MODE_ITEM: Item = Item::enumeration(b"Mode", &[&NORMAL, &ECONOMY, &PARTY, &AWAY], &MODE);
static DAYS_ITEM: Item = Item::bitset(
    b"Days",
    &[&MONDAY, &TUESDAY, &WEDNESDAY, &THURSDAY, &FRIDAY, &SATURDAY, &SUNDAY],
    &DAYS,
);
static TARGET_ITEM: Item = Item::range(b"Cel", 5, 30, &TARGET);
static ECO_ITEM: Item = Item::range(b"Eco", -8, 0, &ECO_OFFSET);
static BACKLIGHT_ITEM: Item = Item::range(b"Light s", 5, 120, &BACKLIGHT);
static RESET: Item = Item::action(b"Reset", &reset_defaults);
static VERSION: Item = Item::symbol(b"menu 0.1");

static PROGRAM: Item = Item::list(b"Program", &[&DAYS_ITEM, &TARGET_ITEM, &ECO_ITEM]);
static SETUP: Item = Item::list(b"Setup", &[&BACKLIGHT_ITEM, &RESET, &VERSION]);
static ROOT: Item = Item::list(b"Futes", &[&MODE_ITEM, &PROGRAM, &SETUP]);

/// Prints each frame to the host console.
struct HostDisplay {
    out: hio::HStdout,
}

impl Display for HostDisplay {
    type Error = ();

    fn clear(&mut self) -> Result<(), ()> {
        self.out.write_all(b"\n================")
    }

    fn set_position(&mut self, _column: u8, row: u8) -> Result<(), ()> {
        if row == 0 {
            self.out.write_all(b"\n----------------")?;
        }
        self.out.write_all(b"\n")
    }

    fn print(&mut self, text: &[u8]) -> Result<(), ()> {
        self.out.write_all(text)
    }
}

#[entry]
fn main() -> ! {
    let device = pac::Peripherals::take().unwrap();
    let core = cortex_m::Peripherals::take().unwrap();

    let mut flash = device.FLASH.constrain();
    let mut rcc = device.RCC.constrain();
    let clocks = rcc
        .cfgr
        .use_hse(8.mhz())
        .sysclk(72.mhz())
        .pclk1(36.mhz())
        .adcclk(9.mhz())
        .freeze(&mut flash.acr);

    let mut gpioa = device.GPIOA.split(&mut rcc.apb2);
    let keys = gpioa.pa0.into_analog(&mut gpioa.crl);
    let mut adc1 = Adc::adc1(device.ADC1, &mut rcc.apb2, clocks);
    let mut delay = Delay::new(core.SYST, clocks);

    let mut hstdout = hio::hstdout().unwrap();
    if let Err(error) = validate(&ROOT, DEFAULT_DEPTH) {
        writeln!(hstdout, "menu: {}", error).unwrap();
    }

    let display = HostDisplay {
        out: hio::hstdout().unwrap(),
    };
    let walker: Walker<_> = Walker::new(&ROOT, display);
    let mut controller = KeypadController::new(walker, LcdKeypad);
    controller.begin().unwrap();

    // the shield ladder read by the 12 bit converter
    let mut keypad = AnalogKeypad::with_thresholds(keys, Thresholds::TEN_BIT.scaled(12));

    loop {
        match keypad.read::<pac::ADC1, _>(&mut adc1) {
            Ok(code) => {
                let _ = controller.on_key_down(code);
            }
            Err(nb::Error::WouldBlock) => {}
            Err(nb::Error::Other(_)) => {
                writeln!(hstdout, "adc error").unwrap();
            }
        }
        delay.delay_ms(10u16);
    }
}
