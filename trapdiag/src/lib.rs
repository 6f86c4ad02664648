#![cfg_attr(not(test), no_std)]

pub mod bug;
pub mod config;
pub mod console;
pub mod context;
pub mod error;
pub mod hex;
pub mod panic;
pub mod report;
pub mod trap;

pub use bug::{BugEntry, BugRegistry, BugSite};
pub use console::{BufferConsole, Console, ConsoleRead};
pub use context::{Reg, RegisterSnapshot};
pub use error::{DiagError, DiagErrorNum};
pub use panic::Halt;
pub use trap::{AbortCause, AbortDispatcher, AbortEvent, AbortLatch, AbortState};
