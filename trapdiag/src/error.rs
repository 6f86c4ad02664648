use core::fmt::{Debug, Display, Formatter, Result};
use core::panic::Location;

#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
/// POSIX errno
pub enum DiagErrorNum {
    EINVAL = 22, // Invalid argument.
    ENOSPC = 28, // No space left on device.
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct DiagError {
    pub num: DiagErrorNum,
    pub loc_line: u32,
    pub loc_col: u32,
    pub loc_file: &'static str,
    pub msg: &'static str,
}

impl DiagError {
    /// Builds an error located at the caller.
    #[track_caller]
    pub fn new(num: DiagErrorNum, msg: &'static str) -> Self {
        let loc = Location::caller();
        Self {
            num,
            loc_line: loc.line(),
            loc_col: loc.column(),
            loc_file: loc.file(),
            msg,
        }
    }
}

impl Debug for DiagError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "[{}:{}:{}] {:?}: {}",
            self.loc_file, self.loc_line, self.loc_col, self.num, self.msg
        )
    }
}

impl Display for DiagError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{:?}: {}", self.num, self.msg)
    }
}
