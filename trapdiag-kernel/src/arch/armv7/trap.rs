use core::arch::{asm, global_asm};

use log::error;
use trapdiag::bug::bug_table;
use trapdiag::report::render_register_dump;
use trapdiag::trap::handle_irq;
use trapdiag::{AbortCause, AbortDispatcher, AbortEvent, AbortLatch, Halt, RegisterSnapshot};

use super::Wfe;
use crate::uart::Pl011;

global_asm!(include_str!("trap.S"));

static ABORT_LATCH: AbortLatch = AbortLatch::new();

extern "C" {
    fn __vectors();
}

/// Points VBAR at the vector table.
pub fn install_trap_vector() {
    unsafe {
        asm!(
            "mcr p15, 0, {vbar}, c12, c0, 0",
            "isb",
            vbar = in(reg) __vectors as usize,
            options(nostack)
        );
    }
}

#[unsafe(no_mangle)]
extern "C" fn do_abort(regs: &RegisterSnapshot, cause: u32) -> ! {
    let mut cpu = Wfe;

    // Faulting again while reporting: the first report is all we get.
    if !ABORT_LATCH.enter() {
        cpu.wait_forever()
    }

    let mut con = Pl011::new();
    match AbortCause::from_raw(cause) {
        Ok(cause) => {
            AbortDispatcher::new(bug_table(), con).dispatch(AbortEvent::new(cause, *regs), &mut cpu)
        }
        Err(err) => {
            error!("abort: {:?} (cause {})", err, cause);
            render_register_dump(&mut con, regs);
            trapdiag::panic::panic(&mut con, &mut cpu)
        }
    }
}

#[unsafe(no_mangle)]
extern "C" fn do_irq(regs: &RegisterSnapshot) {
    handle_irq(regs);
}
