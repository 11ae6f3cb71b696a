//! Error types surfaced by the core.
//!
//! `FrameError` covers the builder/parser boundary only; `Error` is the
//! broader set a transport layer built on top of this crate would also
//! need (`Closed`, `Io`, `Timeout`), kept here so such a layer can share
//! one error type with the framing core instead of wrapping it twice.

use core::fmt;

/// Error produced by the frame builder or parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Argument or buffer is unusable (too short, wrong shape).
    Invalid,
    /// Declared or supplied length exceeds `MAX_PAYLOAD` or a buffer's capacity.
    Overflow,
    /// CRC over header+payload did not match the trailing CRC field.
    Crc { expected: u16, got: u16 },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::Invalid => write!(f, "invalid argument or buffer"),
            FrameError::Overflow => write!(f, "payload or buffer length overflow"),
            FrameError::Crc { expected, got } => {
                write!(f, "CRC mismatch: expected {expected:#06x}, got {got:#06x}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FrameError {}

/// Broader error set for code layered on top of the framing core (e.g. a
/// transport implementation). Not produced by anything in this crate, but
/// defined here so callers can fold `FrameError` into it with `?` via
/// `From<FrameError> for Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    Invalid,
    Overflow,
    Crc { expected: u16, got: u16 },
    /// Peer closed the connection.
    Closed,
    /// Transport I/O error.
    Io,
    /// Operation timed out.
    Timeout,
}

impl From<FrameError> for Error {
    fn from(e: FrameError) -> Self {
        match e {
            FrameError::Invalid => Error::Invalid,
            FrameError::Overflow => Error::Overflow,
            FrameError::Crc { expected, got } => Error::Crc { expected, got },
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Invalid => write!(f, "invalid argument or buffer"),
            Error::Overflow => write!(f, "payload or buffer length overflow"),
            Error::Crc { expected, got } => {
                write!(f, "CRC mismatch: expected {expected:#06x}, got {got:#06x}")
            }
            Error::Closed => write!(f, "connection closed"),
            Error::Io => write!(f, "I/O error"),
            Error::Timeout => write!(f, "operation timed out"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_error_converts_into_broader_error() {
        let e: Error = FrameError::Crc { expected: 1, got: 2 }.into();
        assert_eq!(e, Error::Crc { expected: 1, got: 2 });
    }
}
