use core::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, trace};

use crate::bug::{find_bug, BugEntry};
use crate::console::Console;
use crate::context::RegisterSnapshot;
use crate::error::{DiagError, DiagErrorNum};
use crate::panic::{self, Halt};
use crate::report::{render_bug_report, render_register_dump};

numeric_enum_macro::numeric_enum! {
    #[repr(u32)]
    #[derive(Debug, Eq, PartialEq, Copy, Clone)]
    pub enum AbortCause {
        Undefined = 0,
        PrefetchAbort = 1,
        DataAbort = 2,
    }
}

impl AbortCause {
    /// Converts the cause number passed by the vector stubs.
    pub fn from_raw(raw: u32) -> Result<Self, DiagError> {
        match Self::try_from(raw) {
            Ok(cause) => Ok(cause),
            Err(_) => Err(DiagError::new(DiagErrorNum::EINVAL, "unknown abort cause")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbortEvent {
    pub cause: AbortCause,
    pub regs: RegisterSnapshot,
}

impl AbortEvent {
    pub fn new(cause: AbortCause, regs: RegisterSnapshot) -> Self {
        Self { cause, regs }
    }

    // Always the saved pc. For a `udf` bug site that is the marked address;
    // for prefetch and data aborts it is whatever the vector stub computed.
    pub fn fault_addr(&self) -> u32 {
        self.regs.pc()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortState<'r> {
    Entered,
    Lookup,
    BugFound(&'r BugEntry),
    BugNotFound,
    Dumped,
    /// Terminal. No transition leaves it.
    Panicked,
}

/// Drives one [`AbortEvent`] from entry to the halt.
pub struct AbortDispatcher<'r, C: Console> {
    table: &'r [BugEntry],
    con: C,
}

impl<'r, C: Console> AbortDispatcher<'r, C> {
    pub fn new(table: &'r [BugEntry], con: C) -> Self {
        Self { table, con }
    }

    pub fn console(&self) -> &C {
        &self.con
    }

    pub fn step(&mut self, event: &AbortEvent, state: AbortState<'r>) -> AbortState<'r> {
        let next = match state {
            AbortState::Entered => {
                debug!(
                    "abort: {:?} at pc={:#010x} sp={:#010x} lr={:#010x}",
                    event.cause,
                    event.fault_addr(),
                    event.regs.sp(),
                    event.regs.lr()
                );
                AbortState::Lookup
            }
            AbortState::Lookup => match find_bug(self.table, event.fault_addr()) {
                Some(entry) => AbortState::BugFound(entry),
                None => AbortState::BugNotFound,
            },
            AbortState::BugFound(entry) => {
                info!("abort: matched bug site {}:{}", entry.file, entry.line);
                render_bug_report(&mut self.con, entry);
                render_register_dump(&mut self.con, &event.regs);
                AbortState::Dumped
            }
            AbortState::BugNotFound => {
                render_register_dump(&mut self.con, &event.regs);
                AbortState::Dumped
            }
            AbortState::Dumped => {
                panic::announce(&mut self.con);
                AbortState::Panicked
            }
            AbortState::Panicked => AbortState::Panicked,
        };
        trace!("abort: {:?} -> {:?}", state, next);
        next
    }

    /// Steps from [`AbortState::Entered`] until the machine has panicked.
    /// All output is written by the time this returns.
    pub fn run(&mut self, event: &AbortEvent) -> AbortState<'r> {
        let mut state = AbortState::Entered;
        while state != AbortState::Panicked {
            state = self.step(event, state);
        }
        state
    }

    pub fn dispatch<H: Halt + ?Sized>(mut self, event: AbortEvent, cpu: &mut H) -> ! {
        self.run(&event);
        cpu.wait_forever()
    }
}

/// Interrupts are acknowledged by the vector stub and otherwise ignored.
pub fn handle_irq(regs: &RegisterSnapshot) {
    trace!("irq at pc={:#010x}", regs.pc());
}

/// Set by the first abort. A second abort while reporting the first must
/// not print again.
pub struct AbortLatch(AtomicBool);

impl AbortLatch {
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    pub fn enter(&self) -> bool {
        !self.0.swap(true, Ordering::AcqRel)
    }
}

impl Default for AbortLatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::BufferConsole;
    use crate::context::Reg;
    use crate::panic::PANIC_MESSAGE;

    const ENTRY: BugEntry = BugEntry::new(0x1234, "foo.c", 42, "test");

    fn event_at(pc: u32) -> AbortEvent {
        AbortEvent::new(
            AbortCause::Undefined,
            RegisterSnapshot::zeroed().with(Reg::Pc, pc),
        )
    }

    #[test]
    fn raw_causes_convert() {
        assert_eq!(AbortCause::from_raw(0), Ok(AbortCause::Undefined));
        assert_eq!(AbortCause::from_raw(1), Ok(AbortCause::PrefetchAbort));
        assert_eq!(AbortCause::from_raw(2), Ok(AbortCause::DataAbort));
        assert_eq!(AbortCause::from_raw(3).unwrap_err().num, DiagErrorNum::EINVAL);
    }

    #[test]
    fn matched_fault_walks_found_branch() {
        let table = [ENTRY];
        let event = event_at(0x1234);
        let mut dispatcher = AbortDispatcher::new(&table, BufferConsole::<1024>::new());

        let mut state = AbortState::Entered;
        let mut trace = Vec::new();
        while state != AbortState::Panicked {
            state = dispatcher.step(&event, state);
            trace.push(state);
        }

        assert_eq!(
            trace,
            [
                AbortState::Lookup,
                AbortState::BugFound(&table[0]),
                AbortState::Dumped,
                AbortState::Panicked,
            ]
        );
    }

    #[test]
    fn unmatched_fault_skips_report() {
        let table = [ENTRY];
        let event = event_at(0x1238);
        let mut dispatcher = AbortDispatcher::new(&table, BufferConsole::<1024>::new());

        assert_eq!(dispatcher.step(&event, AbortState::Lookup), AbortState::BugNotFound);
        assert_eq!(dispatcher.step(&event, AbortState::BugNotFound), AbortState::Dumped);

        let out = dispatcher.console().as_str().unwrap();
        assert!(out.starts_with("r0 : 00000000\n"));
        assert!(!out.contains("BUG:"));
    }

    #[test]
    fn panicked_is_terminal_and_silent() {
        let event = event_at(0);
        let mut dispatcher = AbortDispatcher::new(&[], BufferConsole::<1024>::new());

        assert_eq!(dispatcher.run(&event), AbortState::Panicked);
        let len = dispatcher.console().as_bytes().len();
        assert!(dispatcher.console().as_str().unwrap().ends_with(PANIC_MESSAGE));

        for _ in 0..3 {
            assert_eq!(dispatcher.step(&event, AbortState::Panicked), AbortState::Panicked);
        }
        assert_eq!(dispatcher.console().as_bytes().len(), len);
    }

    #[test]
    fn cause_does_not_change_output() {
        let table = [ENTRY];
        let regs = RegisterSnapshot::zeroed().with(Reg::Pc, 0x1234);
        let render = |cause| {
            let mut dispatcher = AbortDispatcher::new(&table, BufferConsole::<1024>::new());
            dispatcher.run(&AbortEvent::new(cause, regs));
            dispatcher.console().as_bytes().to_vec()
        };

        let undef = render(AbortCause::Undefined);
        assert_eq!(undef, render(AbortCause::PrefetchAbort));
        assert_eq!(undef, render(AbortCause::DataAbort));
    }

    #[test]
    fn latch_admits_first_abort_only() {
        let latch = AbortLatch::new();
        assert!(latch.enter());
        assert!(!latch.enter());
        assert!(!latch.enter());
    }

    #[test]
    fn irq_is_ignored() {
        let table = [ENTRY];
        let event = event_at(0x1234);
        let mut dispatcher = AbortDispatcher::new(&table, BufferConsole::<1024>::new());

        handle_irq(&event.regs);
        assert!(dispatcher.console().as_bytes().is_empty());

        // An abort after the interrupt still starts from the beginning.
        assert_eq!(dispatcher.step(&event, AbortState::Entered), AbortState::Lookup);
        assert!(dispatcher.console().as_bytes().is_empty());
    }
}
