use std::io::{self, Write};

use byteorder::{BigEndian, ByteOrder};

use crate::scan::Scanner;

const ZERO: &str = "zero";

const ONES: [&str; 9] = [
    "jeden", "dwa", "trzy", "cztery", "pięć", "sześć", "siedem", "osiem", "dziewięć",
];

const TEENS: [&str; 10] = [
    "dziesięć",
    "jedenaście",
    "dwanaście",
    "trzynaście",
    "czternaście",
    "piętnaście",
    "szesnaście",
    "siedemnaście",
    "osiemnaście",
    "dziewiętnaście",
];

const IRREGULAR_TENS: [&str; 3] = ["dwadzieścia", "trzydzieści", "czterdzieści"];

// 50 through 90 are the ones word plus this suffix.
const TENS_SUFFIX: &str = "dziesiąt";

const HUNDREDS: [&str; 2] = ["sto", "dwieście"];

/// Separator between the limbs of a composite integer.
pub const SHIFT: &str = "<<";

/// Write `n` as a Polish cardinal numeral
pub fn write_byte<W: Write>(w: &mut W, n: u8) -> io::Result<()> {
    if n == 0 {
        return w.write_all(ZERO.as_bytes());
    }
    let hundreds = (n / 100) as usize;
    let tens = (n % 100 / 10) as usize;
    let units = (n % 10) as usize;
    if hundreds > 0 {
        w.write_all(HUNDREDS[hundreds - 1].as_bytes())?;
        if tens > 0 || units > 0 {
            w.write_all(b" ")?;
        }
    }
    if tens == 1 {
        return w.write_all(TEENS[units].as_bytes());
    }
    match tens {
        2..=4 => w.write_all(IRREGULAR_TENS[tens - 2].as_bytes())?,
        5..=9 => {
            w.write_all(ONES[tens - 1].as_bytes())?;
            w.write_all(TENS_SUFFIX.as_bytes())?;
        }
        _ => {}
    }
    if tens >= 2 && units > 0 {
        w.write_all(b" ")?;
    }
    if units > 0 {
        w.write_all(ONES[units - 1].as_bytes())?;
    }
    Ok(())
}

/// Write `n` as big-endian byte numerals joined by `<<`, leading zero
/// bytes elided
pub fn write_u64<W: Write>(w: &mut W, n: u64) -> io::Result<()> {
    let mut limbs = [0u8; 8];
    BigEndian::write_u64(&mut limbs, n);
    let Some(first) = limbs.iter().position(|&b| b != 0) else {
        return w.write_all(ZERO.as_bytes());
    };
    for (i, &limb) in limbs.iter().enumerate().skip(first) {
        if i > first {
            w.write_all(SHIFT.as_bytes())?;
        }
        write_byte(w, limb)?;
    }
    Ok(())
}

/// Parse one byte numeral greedily.
///
/// Never fails: input that matches no word yields 0 with the cursor unmoved.
/// A space consumed between words is given back when nothing smaller follows
/// it, so the surrounding grammar still sees that space.
pub fn read_byte(s: &mut Scanner) -> u8 {
    if s.eat(ZERO) {
        return 0;
    }
    let mut value: u16 = 0;
    if s.eat(HUNDREDS[0]) {
        value = 100;
    } else if s.eat(HUNDREDS[1]) {
        value = 200;
    }
    if value > 0 {
        let before_space = s.offset();
        if !s.eat(" ") {
            return value as u8;
        }
        let low = read_below_hundred(s);
        if low == 0 {
            s.rewind(before_space);
        }
        return (value + low) as u8;
    }
    read_below_hundred(s) as u8
}

/// Parse a `<<`-composed integer, most significant limb first
pub fn read_u64(s: &mut Scanner) -> u64 {
    let mut value = read_byte(s) as u64;
    while s.eat(SHIFT) {
        value = value << 8 | read_byte(s) as u64;
    }
    value
}

fn read_below_hundred(s: &mut Scanner) -> u16 {
    let tens = read_tens(s);
    if tens > 0 {
        let before_space = s.offset();
        if !s.eat(" ") {
            return tens;
        }
        let units = read_teen_or_ones(s);
        if units == 0 {
            s.rewind(before_space);
        }
        return tens + units;
    }
    read_teen_or_ones(s)
}

fn read_tens(s: &mut Scanner) -> u16 {
    for (i, word) in IRREGULAR_TENS.iter().enumerate() {
        if s.eat(word) {
            return (i as u16 + 2) * 10;
        }
    }
    for i in 4..9 {
        let mark = s.offset();
        if s.eat(ONES[i]) {
            if s.eat(TENS_SUFFIX) {
                return (i as u16 + 1) * 10;
            }
            s.rewind(mark);
        }
    }
    0
}

fn read_teen_or_ones(s: &mut Scanner) -> u16 {
    for (i, word) in TEENS.iter().enumerate() {
        if s.eat(word) {
            return i as u16 + 10;
        }
    }
    for (i, word) in ONES.iter().enumerate() {
        if s.eat(word) {
            return i as u16 + 1;
        }
    }
    0
}
