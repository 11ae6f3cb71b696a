#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod constants;
pub mod crc;
pub mod error;
pub mod float_codec;
pub mod frame;
pub mod message;
pub mod metrics;
pub mod transport;

pub use crc::{crc16, crc16_update};
pub use error::{Error, FrameError};
pub use float_codec::{f32_from_be, f32_to_be};
pub use frame::{FeedResult, FrameBuilder, FrameParser, FrameStats};
pub use message::{
    CommandResult, CommandType, DeviceStatus, Message, MessageKind, StatusPayload,
};
pub use metrics::{MetricRecord, MetricType};
pub use transport::Transport;
