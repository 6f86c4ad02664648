//! ARMv7-A (Cortex-A7, Raspberry Pi 2)

mod boot;
mod trap;

use core::arch::asm;

use trapdiag::Halt;

pub use trap::install_trap_vector;

/// Parks the core in `wfe` with interrupts masked.
pub struct Wfe;

impl Halt for Wfe {
    fn wait_forever(&mut self) -> ! {
        unsafe { asm!("cpsid if", options(nomem, nostack)) };
        loop {
            unsafe { asm!("wfe", options(nomem, nostack)) };
        }
    }
}
