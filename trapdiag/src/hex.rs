use core::fmt;

use crate::console::Console;

pub const HEX_WIDTH: usize = 8;

const DIGITS: &[u8; 16] = b"0123456789abcdef";

/// A 32-bit word rendered as eight lowercase hex digits, most significant
/// nibble first, zero padded and without a `0x` prefix.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct HexWord([u8; HEX_WIDTH]);

impl HexWord {
    pub fn new(value: u32) -> Self {
        let mut buf = [0u8; HEX_WIDTH];
        for (i, slot) in buf.iter_mut().rev().enumerate() {
            let nibble = (value >> (i * 4)) & 0xf;
            *slot = DIGITS[nibble as usize];
        }
        Self(buf)
    }

    pub fn as_bytes(&self) -> &[u8; HEX_WIDTH] {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        // Every byte comes from DIGITS.
        match core::str::from_utf8(&self.0) {
            Ok(s) => s,
            Err(_) => unreachable!(),
        }
    }
}

impl fmt::Display for HexWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for HexWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HexWord({})", self.as_str())
    }
}

pub fn hex(value: u32) -> HexWord {
    HexWord::new(value)
}

pub fn print_hex<C: Console + ?Sized>(con: &mut C, value: u32) {
    con.puts(hex(value).as_str());
}
