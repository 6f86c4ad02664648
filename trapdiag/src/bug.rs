use core::panic::Location;

use arrayvec::ArrayVec;
use log::{trace, warn};
use spin::Once;

use crate::config::BUG_TABLE_CAPACITY;
use crate::error::{DiagError, DiagErrorNum};

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BugSite {
    pub file: &'static str,
    pub line: u32,
    pub msg: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BugEntry {
    pub addr: u32,
    pub file: &'static str,
    pub line: u32,
    pub msg: &'static str,
}

impl BugEntry {
    pub const fn new(addr: u32, file: &'static str, line: u32, msg: &'static str) -> Self {
        Self {
            addr,
            file,
            line,
            msg,
        }
    }

    pub const fn from_site(addr: u32, site: &BugSite) -> Self {
        Self::new(addr, site.file, site.line, site.msg)
    }
}

pub fn find_bug(table: &[BugEntry], addr: u32) -> Option<&BugEntry> {
    table.iter().find(|b| b.addr == addr)
}

/// Fixed-capacity bug table. Entries keep their insertion order and
/// duplicate addresses are allowed; lookups return the earliest match.
#[derive(Clone)]
pub struct BugRegistry {
    entries: ArrayVec<BugEntry, BUG_TABLE_CAPACITY>,
}

impl BugRegistry {
    pub const fn new() -> Self {
        Self {
            entries: ArrayVec::new_const(),
        }
    }

    pub fn from_entries<I>(entries: I) -> Result<Self, DiagError>
    where
        I: IntoIterator<Item = BugEntry>,
    {
        let mut registry = Self::new();
        for entry in entries {
            registry.push(entry)?;
        }
        Ok(registry)
    }

    pub fn push(&mut self, entry: BugEntry) -> Result<(), DiagError> {
        if self.entries.try_push(entry).is_err() {
            warn!(
                "bug table full, dropping {}:{} at {:#010x}",
                entry.file, entry.line, entry.addr
            );
            return Err(DiagError::new(DiagErrorNum::ENOSPC, "bug table full"));
        }
        trace!("bug site {}:{} at {:#010x}", entry.file, entry.line, entry.addr);
        Ok(())
    }

    /// Records the caller's source location as a bug site at `addr`.
    #[track_caller]
    pub fn mark(&mut self, addr: u32, msg: &'static str) -> Result<(), DiagError> {
        let loc = Location::caller();
        self.push(BugEntry::new(addr, loc.file(), loc.line(), msg))
    }

    pub fn find_bug(&self, addr: u32) -> Option<&BugEntry> {
        find_bug(&self.entries, addr)
    }

    pub fn entries(&self) -> &[BugEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for BugRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static BUG_TABLE: Once<BugRegistry> = Once::new();

// Only the first call runs `build`.
pub fn install<F>(build: F) -> &'static BugRegistry
where
    F: FnOnce() -> BugRegistry,
{
    BUG_TABLE.call_once(build)
}

pub fn bug_table() -> &'static [BugEntry] {
    match BUG_TABLE.get() {
        Some(registry) => registry.entries(),
        None => &[],
    }
}
