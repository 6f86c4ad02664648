//! Register dumps and bug reports.
//!
//! The output is parsed by host tooling, so every byte is fixed:
//!
//! ```text
//! \nBUG: <file>:<line as 8 hex digits> <message>\n
//! <reg>: <value as 8 hex digits>\n      (x16, r0..r12, sp, lr, pc)
//! ```

use crate::bug::BugEntry;
use crate::console::Console;
use crate::context::RegisterSnapshot;
use crate::hex::print_hex;

pub const BUG_HEADER: &str = "\nBUG: ";

/// Prints one line per register in snapshot order.
pub fn render_register_dump<C: Console + ?Sized>(con: &mut C, regs: &RegisterSnapshot) {
    for (reg, value) in regs.iter() {
        con.puts(reg.name());
        con.puts(": ");
        print_hex(con, value);
        con.puts("\n");
    }
}

/// Prints the source context of a matched bug site.
///
/// The line number goes through the hex renderer like every other word in
/// the report, so line 42 prints as `0000002a`.
pub fn render_bug_report<C: Console + ?Sized>(con: &mut C, entry: &BugEntry) {
    con.puts(BUG_HEADER);
    con.puts(entry.file);
    con.puts(":");
    print_hex(con, entry.line);
    con.puts(" ");
    con.puts(entry.msg);
    con.puts("\n");
}
