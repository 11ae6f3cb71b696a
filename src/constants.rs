//! Wire-format constants shared by the frame builder and parser.
//!
//! These must match bit-for-bit across every implementation of this
//! protocol (host and device sides, and any other language binding).

/// Literal two-byte sync pair that opens every frame.
pub const SYNC: [u8; 2] = [0xAA, 0x55];

/// Maximum payload length in bytes.
pub const MAX_PAYLOAD: usize = 4096;

/// Size of the fixed header: sync(2) + length(2) + type(1) + seq(1).
pub const HEADER_SIZE: usize = 6;

/// Size of the trailing CRC field.
pub const CRC_SIZE: usize = 2;

/// Smallest legal frame: header + CRC, zero-length payload.
pub const MIN_FRAME: usize = HEADER_SIZE + CRC_SIZE;

/// Largest legal frame: header + MAX_PAYLOAD + CRC.
pub const MAX_FRAME: usize = HEADER_SIZE + MAX_PAYLOAD + CRC_SIZE;

/// CRC-16-CCITT polynomial (no reflection, no final XOR).
pub const CRC_POLY: u16 = 0x1021;

/// CRC-16-CCITT initial register value.
pub const CRC_INIT: u16 = 0xFFFF;

pub mod command_constants {
    /// Restart a running service on the device.
    pub const RESTART_SERVICE: u8 = 0x01;
    /// Clear an on-device cache.
    pub const CLEAR_CACHE: u8 = 0x02;
    /// Rotate on-device log files.
    pub const ROTATE_LOGS: u8 = 0x03;
    /// Set cooling fan speed.
    pub const SET_FAN_SPEED: u8 = 0x04;
    /// Switch the device's power mode.
    pub const SET_POWER_MODE: u8 = 0x05;
    /// Run antenna calibration.
    pub const CALIBRATE_ANTENNA: u8 = 0x06;
    /// Switch the active RF channel.
    pub const SWITCH_CHANNEL: u8 = 0x07;
    /// Enable a packet filter.
    pub const ENABLE_FILTER: u8 = 0x08;
    /// Block an IP address.
    pub const BLOCK_IP: u8 = 0x09;
    /// Run an on-device diagnostic routine.
    pub const RUN_DIAGNOSTIC: u8 = 0x0A;
    /// Execute an arbitrary shell command (device-specific, use with care).
    pub const CUSTOM_SHELL: u8 = 0xFF;
}
