//! Bug sites placed with [`bug!`] and the table the linker collects them in.

use core::mem::size_of;
use core::slice;

use log::error;
use trapdiag::bug::{self, BugEntry, BugRegistry, BugSite};

/// Traps with an undefined instruction and registers the call site.
///
/// The `udf` address and a pointer to the site's source context are
/// appended to `.bug_table`. When the instruction faults, the pc in the
/// saved registers equals that address and the report names this line.
#[macro_export]
macro_rules! bug {
    ($msg:expr) => {{
        static SITE: ::trapdiag::BugSite = ::trapdiag::BugSite {
            file: file!(),
            line: line!(),
            msg: $msg,
        };
        unsafe {
            core::arch::asm!(
                "2:",
                "udf #0",
                ".pushsection .bug_table, \"a\"",
                ".balign 4",
                ".word 2b",
                ".word {site}",
                ".popsection",
                site = sym SITE,
                options(noreturn),
            )
        }
    }};
}

/// Layout of one `.bug_table` record as emitted by [`bug!`].
#[repr(C)]
struct BugRecord {
    addr: u32,
    site: &'static BugSite,
}

extern "C" {
    fn __bug_start();
    fn __bug_end();
}

fn records() -> &'static [BugRecord] {
    let start = __bug_start as *const BugRecord as usize;
    let end = __bug_end as *const BugRecord as usize;
    let len = (end - start) / size_of::<BugRecord>();
    unsafe { slice::from_raw_parts(start as *const BugRecord, len) }
}

/// Builds the bug table from `.bug_table`. Runs before the trap vector is
/// installed, so no abort can observe a half-built table.
pub fn install() -> &'static BugRegistry {
    bug::install(|| {
        let mut registry = BugRegistry::new();
        for record in records() {
            if let Err(err) = registry.push(BugEntry::from_site(record.addr, record.site)) {
                error!("bug table: {:?}", err);
                break;
            }
        }
        registry
    })
}
