//! PL011 transport for the console.
//!
//! The firmware leaves UART0 clocked at 115200 8N1 on GPIO 14/15; only the
//! data and flag registers are touched here.

use core::ptr::{read_volatile, write_volatile};

use trapdiag::{Console, ConsoleRead};

#[cfg(all(feature = "bcm2835", feature = "bcm2836"))]
compile_error!("select one of the `bcm2835` and `bcm2836` features");

#[cfg(feature = "bcm2835")]
const PERIPHERAL_BASE: usize = 0x2000_0000;
#[cfg(not(feature = "bcm2835"))]
const PERIPHERAL_BASE: usize = 0x3f00_0000;

const UART0_BASE: usize = PERIPHERAL_BASE + 0x0020_1000;

const UART_DR: usize = 0x00;
const UART_FR: usize = 0x18;

const FR_RXFE: u32 = 1 << 4; // Receive FIFO empty
const FR_TXFF: u32 = 1 << 5; // Transmit FIFO full

/// Handle to UART0. Holds no state, so any number may exist at once.
pub struct Pl011 {
    base: usize,
}

impl Pl011 {
    pub const fn new() -> Self {
        Self { base: UART0_BASE }
    }

    fn reg_get(&self, offset: usize) -> u32 {
        unsafe { read_volatile((self.base + offset) as *const u32) }
    }

    fn reg_put(&self, offset: usize, val: u32) {
        unsafe { write_volatile((self.base + offset) as *mut u32, val) }
    }
}

impl Console for Pl011 {
    fn emit_byte(&mut self, b: u8) {
        while self.reg_get(UART_FR) & FR_TXFF != 0 {
            core::hint::spin_loop();
        }
        self.reg_put(UART_DR, b as u32);
    }
}

impl ConsoleRead for Pl011 {
    fn receive_byte(&mut self) -> u8 {
        loop {
            if let Some(b) = self.try_receive_byte() {
                return b;
            }
            core::hint::spin_loop();
        }
    }

    fn try_receive_byte(&mut self) -> Option<u8> {
        if self.reg_get(UART_FR) & FR_RXFE != 0 {
            return None;
        }
        Some((self.reg_get(UART_DR) & 0xff) as u8)
    }
}
