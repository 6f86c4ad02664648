use crate::console::Console;

pub const PANIC_MESSAGE: &str = "panic!, entering infinite loop...\n";

pub trait Halt {
    /// Parks the CPU for good. Must not emit output or return.
    fn wait_forever(&mut self) -> ! {
        loop {
            core::hint::spin_loop();
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SpinHalt;

impl Halt for SpinHalt {}

pub fn announce<C: Console + ?Sized>(con: &mut C) {
    con.puts(PANIC_MESSAGE);
}

/// Prints [`PANIC_MESSAGE`] and halts. Never returns.
pub fn panic<C, H>(con: &mut C, cpu: &mut H) -> !
where
    C: Console + ?Sized,
    H: Halt + ?Sized,
{
    announce(con);
    cpu.wait_forever()
}
