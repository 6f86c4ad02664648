#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(all(target_os = "none", target_arch = "arm"))]
#[path = "arch/armv7/mod.rs"]
mod arch;
#[cfg(target_os = "none")]
#[macro_use]
mod bug;
#[cfg(target_os = "none")]
mod lang_items;
#[cfg(target_os = "none")]
mod logger;
#[cfg(target_os = "none")]
mod uart;

#[cfg(target_os = "none")]
use trapdiag::{Console, ConsoleRead};

/// Entered from `_start` with a stack and a clean bss.
#[cfg(target_os = "none")]
pub extern "C" fn kernel_main() -> ! {
    logger::init();

    let table = bug::install();
    log::info!("{} bug sites registered", table.len());

    arch::install_trap_vector();

    let mut con = uart::Pl011::new();
    con.flush_rx();
    con.puts("welcome!\n");

    echo(&mut con);
    bug!("test")
}

#[cfg(target_os = "none")]
fn echo<C: Console + ConsoleRead>(con: &mut C) {
    for _ in 0..10 {
        let b = con.receive_byte();
        con.emit_byte(b);
    }
}

#[cfg(not(target_os = "none"))]
fn main() {}
