//! The decoded message model: typed kinds, the request/response/event
//! range split, and the status/command payload shapes layered on top of
//! a frame's opaque payload bytes.

use crate::constants::command_constants;
use crate::metrics::METRIC_ALL;

/// A message kind (the frame's `TYPE` byte), grouped into the three
/// closed numeric ranges the wire format reserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum MessageKind {
    // Requests, host -> device (0x01-0x7F)
    Ping,
    RequestMetrics,
    ExecuteCommand,
    SetConfig,
    GetStatus,
    Reboot,
    UpdateFirmware,

    // Responses, device -> host (0x80-0x9F)
    Pong,
    MetricsResponse,
    CommandResult,
    ConfigAck,
    StatusResponse,
    RebootAck,

    // Unsolicited events, device -> host (0xA0-0xFF)
    AlertEvent,
    ThresholdExceeded,
    HardwareFault,
    ConnectionLost,

    /// Any byte not named above. Round-trips unchanged.
    Unknown(u8),
}

impl MessageKind {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0x01 => Self::Ping,
            0x02 => Self::RequestMetrics,
            0x03 => Self::ExecuteCommand,
            0x04 => Self::SetConfig,
            0x05 => Self::GetStatus,
            0x06 => Self::Reboot,
            0x07 => Self::UpdateFirmware,

            0x81 => Self::Pong,
            0x82 => Self::MetricsResponse,
            0x83 => Self::CommandResult,
            0x84 => Self::ConfigAck,
            0x85 => Self::StatusResponse,
            0x86 => Self::RebootAck,

            0xA1 => Self::AlertEvent,
            0xA2 => Self::ThresholdExceeded,
            0xA3 => Self::HardwareFault,
            0xA4 => Self::ConnectionLost,

            other => Self::Unknown(other),
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            Self::Ping => 0x01,
            Self::RequestMetrics => 0x02,
            Self::ExecuteCommand => 0x03,
            Self::SetConfig => 0x04,
            Self::GetStatus => 0x05,
            Self::Reboot => 0x06,
            Self::UpdateFirmware => 0x07,

            Self::Pong => 0x81,
            Self::MetricsResponse => 0x82,
            Self::CommandResult => 0x83,
            Self::ConfigAck => 0x84,
            Self::StatusResponse => 0x85,
            Self::RebootAck => 0x86,

            Self::AlertEvent => 0xA1,
            Self::ThresholdExceeded => 0xA2,
            Self::HardwareFault => 0xA3,
            Self::ConnectionLost => 0xA4,

            Self::Unknown(byte) => byte,
        }
    }

    /// Whether this kind falls in the request range `0x01-0x7F`.
    pub fn is_request(self) -> bool {
        let byte = self.to_byte();
        (0x01..=0x7F).contains(&byte)
    }

    /// Whether this kind falls in the response range `0x80-0x9F`.
    pub fn is_response(self) -> bool {
        let byte = self.to_byte();
        (0x80..=0x9F).contains(&byte)
    }

    /// Whether this kind falls in the unsolicited-event range `0xA0-0xFF`.
    pub fn is_event(self) -> bool {
        self.to_byte() >= 0xA0
    }

    /// The response kind for a request kind: `R | 0x80`.
    pub fn response_kind(self) -> Self {
        Self::from_byte(self.to_byte() | 0x80)
    }
}

/// A decoded frame: kind, sequence, and a borrowed view over its payload.
///
/// The payload borrows from wherever its bytes live — typically a frame
/// parser's internal buffer (see [`crate::frame::FrameParser`]), valid
/// only until the next byte is fed or the parser is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Message<'a> {
    pub kind: MessageKind,
    pub sequence: u8,
    pub payload: &'a [u8],
}

impl<'a> Message<'a> {
    pub fn new(kind: MessageKind, sequence: u8, payload: &'a [u8]) -> Self {
        Self {
            kind,
            sequence,
            payload,
        }
    }
}

/// Builds a zero-payload `PING` message view over an empty static slice.
pub fn make_ping<'a>(sequence: u8) -> Message<'a> {
    Message::new(MessageKind::Ping, sequence, &[])
}

/// Builds a zero-payload `PONG` message view over an empty static slice.
pub fn make_pong<'a>(sequence: u8) -> Message<'a> {
    Message::new(MessageKind::Pong, sequence, &[])
}

/// Builds a `GET_STATUS` request.
pub fn make_status_request<'a>(sequence: u8) -> Message<'a> {
    Message::new(MessageKind::GetStatus, sequence, &[])
}

/// Builds a `REQUEST_METRICS` request.
///
/// `types` is the set of metric type bytes being requested; an empty
/// slice means "all metrics", encoded as the single-byte payload
/// `[0xFF]` per the wire contract. The caller owns `types` and, for the
/// "all metrics" case, the single-byte constant buffer below.
pub fn make_metrics_request(sequence: u8, types: &[u8]) -> Message<'_> {
    if types.is_empty() {
        Message::new(MessageKind::RequestMetrics, sequence, ALL_METRICS_PAYLOAD)
    } else {
        Message::new(MessageKind::RequestMetrics, sequence, types)
    }
}

/// The single-byte `[0xFF]` "all metrics" payload used by
/// [`make_metrics_request`] when no specific types are requested.
const ALL_METRICS_PAYLOAD: &[u8] = &[METRIC_ALL];

/// Builds an `EXECUTE_COMMAND` request. `payload` must already be laid
/// out as `[command_code][params...]`; this crate does not own command
/// parameter encoding beyond the leading code byte.
pub fn make_command(sequence: u8, payload: &[u8]) -> Message<'_> {
    Message::new(MessageKind::ExecuteCommand, sequence, payload)
}

/// Device status codes carried in a `STATUS_RESPONSE` payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum DeviceStatus {
    Ok,
    Warning,
    Error,
    Critical,
    Maintenance,
    Offline,
    Unknown(u8),
}

impl DeviceStatus {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0x00 => Self::Ok,
            0x01 => Self::Warning,
            0x02 => Self::Error,
            0x03 => Self::Critical,
            0x04 => Self::Maintenance,
            0x05 => Self::Offline,
            other => Self::Unknown(other),
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            Self::Ok => 0x00,
            Self::Warning => 0x01,
            Self::Error => 0x02,
            Self::Critical => 0x03,
            Self::Maintenance => 0x04,
            Self::Offline => 0x05,
            Self::Unknown(byte) => byte,
        }
    }
}

/// Size in bytes of a decoded `STATUS_RESPONSE` payload:
/// status(1) + uptime(4) + error_count(2) + warning_count(2).
pub const STATUS_PAYLOAD_SIZE: usize = 9;

/// Decoded `STATUS_RESPONSE` payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusPayload {
    pub status: DeviceStatus,
    pub uptime_seconds: u32,
    pub error_count: u16,
    pub warning_count: u16,
}

impl StatusPayload {
    /// Decodes a status payload from its 9 wire bytes.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < STATUS_PAYLOAD_SIZE {
            return None;
        }
        Some(Self {
            status: DeviceStatus::from_byte(bytes[0]),
            uptime_seconds: u32::from_be_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]),
            error_count: u16::from_be_bytes([bytes[5], bytes[6]]),
            warning_count: u16::from_be_bytes([bytes[7], bytes[8]]),
        })
    }

    /// Encodes this payload to its 9 wire bytes.
    pub fn to_bytes(self) -> [u8; STATUS_PAYLOAD_SIZE] {
        let mut out = [0u8; STATUS_PAYLOAD_SIZE];
        out[0] = self.status.to_byte();
        out[1..5].copy_from_slice(&self.uptime_seconds.to_be_bytes());
        out[5..7].copy_from_slice(&self.error_count.to_be_bytes());
        out[7..9].copy_from_slice(&self.warning_count.to_be_bytes());
        out
    }
}

/// Command type codes carried in an `EXECUTE_COMMAND` request payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum CommandType {
    RestartService,
    ClearCache,
    RotateLogs,
    SetFanSpeed,
    SetPowerMode,
    CalibrateAntenna,
    SwitchChannel,
    EnableFilter,
    BlockIp,
    RunDiagnostic,
    CustomShell,
    Unknown(u8),
}

impl CommandType {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            command_constants::RESTART_SERVICE => Self::RestartService,
            command_constants::CLEAR_CACHE => Self::ClearCache,
            command_constants::ROTATE_LOGS => Self::RotateLogs,
            command_constants::SET_FAN_SPEED => Self::SetFanSpeed,
            command_constants::SET_POWER_MODE => Self::SetPowerMode,
            command_constants::CALIBRATE_ANTENNA => Self::CalibrateAntenna,
            command_constants::SWITCH_CHANNEL => Self::SwitchChannel,
            command_constants::ENABLE_FILTER => Self::EnableFilter,
            command_constants::BLOCK_IP => Self::BlockIp,
            command_constants::RUN_DIAGNOSTIC => Self::RunDiagnostic,
            command_constants::CUSTOM_SHELL => Self::CustomShell,
            other => Self::Unknown(other),
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            Self::RestartService => command_constants::RESTART_SERVICE,
            Self::ClearCache => command_constants::CLEAR_CACHE,
            Self::RotateLogs => command_constants::ROTATE_LOGS,
            Self::SetFanSpeed => command_constants::SET_FAN_SPEED,
            Self::SetPowerMode => command_constants::SET_POWER_MODE,
            Self::CalibrateAntenna => command_constants::CALIBRATE_ANTENNA,
            Self::SwitchChannel => command_constants::SWITCH_CHANNEL,
            Self::EnableFilter => command_constants::ENABLE_FILTER,
            Self::BlockIp => command_constants::BLOCK_IP,
            Self::RunDiagnostic => command_constants::RUN_DIAGNOSTIC,
            Self::CustomShell => command_constants::CUSTOM_SHELL,
            Self::Unknown(byte) => byte,
        }
    }
}

/// Decoded `COMMAND_RESULT` response payload header; `output` is the
/// remaining UTF-8 (but not necessarily valid UTF-8 on the wire — see
/// [`CommandResult::output_str`]) command output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandResult<'a> {
    pub success: bool,
    pub return_code: u8,
    pub output: &'a [u8],
}

impl<'a> CommandResult<'a> {
    pub fn from_bytes(bytes: &'a [u8]) -> Option<Self> {
        if bytes.len() < 2 {
            return None;
        }
        Some(Self {
            success: bytes[0] != 0,
            return_code: bytes[1],
            output: &bytes[2..],
        })
    }

    /// The output bytes interpreted as UTF-8, or `None` if they are not
    /// valid UTF-8 (the wire format makes no guarantee on this point).
    pub fn output_str(&self) -> Option<&'a str> {
        core::str::from_utf8(self.output).ok()
    }
}
