use core::fmt;

use arrayvec::ArrayVec;

pub trait Console {
    fn emit_byte(&mut self, b: u8);

    /// Sends `s` one byte at a time, stopping at the first NUL.
    fn puts(&mut self, s: &str) {
        for b in s.bytes().take_while(|&b| b != 0) {
            self.emit_byte(b);
        }
    }
}

pub trait ConsoleRead {
    fn receive_byte(&mut self) -> u8;

    /// Returns `None` when nothing is waiting.
    fn try_receive_byte(&mut self) -> Option<u8>;

    /// Discards everything already received.
    fn flush_rx(&mut self) {
        while self.try_receive_byte().is_some() {}
    }
}

impl<C: Console + ?Sized> Console for &mut C {
    fn emit_byte(&mut self, b: u8) {
        (**self).emit_byte(b)
    }
}

pub struct ConsoleWriter<'a, C: Console + ?Sized>(pub &'a mut C);

impl<C: Console + ?Sized> fmt::Write for ConsoleWriter<'_, C> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for b in s.bytes() {
            self.0.emit_byte(b);
        }
        Ok(())
    }
}

/// In-memory console with room for `N` bytes. Bytes past the capacity are
/// dropped and counted.
#[derive(Clone, Default)]
pub struct BufferConsole<const N: usize> {
    buf: ArrayVec<u8, N>,
    dropped: usize,
}

impl<const N: usize> BufferConsole<N> {
    pub const fn new() -> Self {
        Self {
            buf: ArrayVec::new_const(),
            dropped: 0,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.buf).ok()
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

impl<const N: usize> Console for BufferConsole<N> {
    fn emit_byte(&mut self, b: u8) {
        if self.buf.try_push(b).is_err() {
            self.dropped += 1;
        }
    }
}

impl<const N: usize> fmt::Debug for BufferConsole<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferConsole")
            .field("len", &self.buf.len())
            .field("dropped", &self.dropped)
            .finish()
    }
}
