//! A character-stream abstraction layer for embedded systems
//!
//! This module provides a small set of traits for working with serial
//! character devices (UARTs, USB CDC endpoints, virtual consoles). The shell
//! and its command handlers are written entirely against these traits, so any
//! driver that implements them can host an interactive session.

#![allow(missing_docs)]
#![deny(unsafe_code)]

use core::fmt;

/// Re-exports of common traits
pub mod prelude {
    pub use super::{Console, PollInput, Read, Write};
}

// Core synchronous traits
pub trait Read {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Read data from the stream, blocking until at least one byte is
    /// available. `Ok(0)` signals end-of-stream.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

pub trait Write {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Write data to the stream
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error>;
    /// Flush the write buffer
    fn flush(&mut self) -> Result<(), Self::Error>;

    /// Write an entire buffer. A writer that accepts zero bytes ends the
    /// attempt without error.
    fn write_all(&mut self, mut buf: &[u8]) -> Result<(), Self::Error> {
        while !buf.is_empty() {
            let written = self.write(buf)?;
            if written == 0 {
                break;
            }
            buf = &buf[written..];
        }
        Ok(())
    }
}

pub trait PollInput {
    /// Non-blocking check for buffered input. Returns `true` if a byte is
    /// waiting to be read. Does not consume the byte.
    fn input_pending(&mut self) -> bool;
}

/// A bidirectional interactive channel, suitable for hosting a shell session
pub trait Console: Read + Write + PollInput {}

/// Adapter that lets [`core::fmt::Write`] formatting target any byte sink.
///
/// Stream write errors surface as [`core::fmt::Error`]; callers that treat
/// console output as best-effort simply discard the result.
pub struct Fmt<'a, W: Write>(pub &'a mut W);

impl<W: Write> fmt::Write for Fmt<'_, W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.write_all(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

/// Best-effort formatted write to a byte sink. Output that cannot be
/// delivered is dropped; the session stays up as long as its input does.
pub fn write_fmt<W: Write>(sink: &mut W, args: fmt::Arguments<'_>) {
    use fmt::Write as _;
    let _ = Fmt(sink).write_fmt(args);
}
