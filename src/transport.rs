//! Transport abstraction.
//!
//! This crate frames and parses messages; it does not own a socket, a
//! UART, or any other byte pipe. [`Transport`] is the capability set a
//! concrete transport (serial, TCP, or otherwise) would need to expose
//! to code built on top of the framing core. Nothing in this crate
//! implements it — that is left entirely to callers.

use crate::error::Error;

/// A byte-oriented connection capable of sending and receiving framed
/// data. Implementations decide what "closed", "timeout", and blocking
/// behavior mean for their transport; this trait only fixes the shape.
pub trait Transport {
    /// Opens the underlying connection.
    fn open(&mut self) -> Result<(), Error>;

    /// Closes the underlying connection. Idempotent.
    fn close(&mut self);

    /// Sends `data`, returning the number of bytes written.
    fn send(&mut self, data: &[u8]) -> Result<usize, Error>;

    /// Receives into `buf`, returning the number of bytes read.
    /// `timeout_ms` of `None` means block indefinitely.
    fn recv(&mut self, buf: &mut [u8], timeout_ms: Option<u32>) -> Result<usize, Error>;

    /// Number of bytes currently available to read without blocking.
    fn available(&mut self) -> Result<usize, Error>;

    /// Flushes any buffered output.
    fn flush(&mut self) -> Result<(), Error>;

    /// Whether the connection is currently open.
    fn is_open(&self) -> bool;
}
