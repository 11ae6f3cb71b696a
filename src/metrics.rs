//! Typed (type, float) metric records and their packed 5-byte wire
//! encoding: 1-byte type code + 4-byte big-endian IEEE-754 float.
//!
//! The type catalogue below is the full set named by this protocol's
//! original implementation, spanning system, RF, performance, device and
//! 5G-radio categories. Any byte outside the named set still round-trips
//! through [`MetricType::Unknown`] — the wire format is agnostic to
//! whether a given type code has a name.

use crate::error::FrameError;
use crate::float_codec::{f32_from_be, f32_to_be};

/// Size in bytes of one packed metric record on the wire.
pub const METRIC_RECORD_SIZE: usize = 5;

/// Sentinel payload value meaning "all metrics", used only in request
/// payloads (never emitted by a device in a response).
pub const METRIC_ALL: u8 = 0xFF;

/// A metric type code. Named variants cover the catalogue in use across
/// this protocol's deployments; [`MetricType::Unknown`] preserves any
/// other byte verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum MetricType {
    // System (0x01-0x08)
    CpuUsage,
    MemoryUsage,
    Temperature,
    Humidity,
    FanSpeed,
    Voltage,
    Current,
    Power,

    // RF (0x10-0x15)
    SignalStrength,
    SignalQuality,
    Interference,
    Ber,
    Vswr,
    AntennaTilt,

    // Performance (0x20-0x24)
    Throughput,
    Latency,
    PacketLoss,
    Jitter,
    ConnectionCount,

    // Device (0x30-0x32)
    BatteryLevel,
    Uptime,
    ErrorCount,

    // 5G NR700 / n28 (0x40-0x43)
    DlThroughputNr700,
    UlThroughputNr700,
    RsrpNr700,
    SinrNr700,

    // 5G NR3500 / n78 (0x50-0x53)
    DlThroughputNr3500,
    UlThroughputNr3500,
    RsrpNr3500,
    SinrNr3500,

    // 5G radio (0x60-0x65)
    PdcpThroughput,
    RlcThroughput,
    InitialBler,
    AvgMcs,
    RbPerSlot,
    RankIndicator,

    // RF quality (0x70-0x73)
    TxImbalance,
    LatencyPing,
    HandoverSuccessRate,
    InterferenceLevel,

    // Carrier aggregation (0x78-0x79)
    CaDlThroughput,
    CaUlThroughput,

    /// `0xFF`, "all metrics" — request-payload-only sentinel.
    All,

    /// Any byte not named above. Round-trips unchanged.
    Unknown(u8),
}

impl MetricType {
    /// Decodes a raw wire byte into a metric type.
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0x01 => Self::CpuUsage,
            0x02 => Self::MemoryUsage,
            0x03 => Self::Temperature,
            0x04 => Self::Humidity,
            0x05 => Self::FanSpeed,
            0x06 => Self::Voltage,
            0x07 => Self::Current,
            0x08 => Self::Power,

            0x10 => Self::SignalStrength,
            0x11 => Self::SignalQuality,
            0x12 => Self::Interference,
            0x13 => Self::Ber,
            0x14 => Self::Vswr,
            0x15 => Self::AntennaTilt,

            0x20 => Self::Throughput,
            0x21 => Self::Latency,
            0x22 => Self::PacketLoss,
            0x23 => Self::Jitter,
            0x24 => Self::ConnectionCount,

            0x30 => Self::BatteryLevel,
            0x31 => Self::Uptime,
            0x32 => Self::ErrorCount,

            0x40 => Self::DlThroughputNr700,
            0x41 => Self::UlThroughputNr700,
            0x42 => Self::RsrpNr700,
            0x43 => Self::SinrNr700,

            0x50 => Self::DlThroughputNr3500,
            0x51 => Self::UlThroughputNr3500,
            0x52 => Self::RsrpNr3500,
            0x53 => Self::SinrNr3500,

            0x60 => Self::PdcpThroughput,
            0x61 => Self::RlcThroughput,
            0x62 => Self::InitialBler,
            0x63 => Self::AvgMcs,
            0x64 => Self::RbPerSlot,
            0x65 => Self::RankIndicator,

            0x70 => Self::TxImbalance,
            0x71 => Self::LatencyPing,
            0x72 => Self::HandoverSuccessRate,
            0x73 => Self::InterferenceLevel,

            0x78 => Self::CaDlThroughput,
            0x79 => Self::CaUlThroughput,

            0xFF => Self::All,

            other => Self::Unknown(other),
        }
    }

    /// Encodes back to the raw wire byte.
    pub fn to_byte(self) -> u8 {
        match self {
            Self::CpuUsage => 0x01,
            Self::MemoryUsage => 0x02,
            Self::Temperature => 0x03,
            Self::Humidity => 0x04,
            Self::FanSpeed => 0x05,
            Self::Voltage => 0x06,
            Self::Current => 0x07,
            Self::Power => 0x08,

            Self::SignalStrength => 0x10,
            Self::SignalQuality => 0x11,
            Self::Interference => 0x12,
            Self::Ber => 0x13,
            Self::Vswr => 0x14,
            Self::AntennaTilt => 0x15,

            Self::Throughput => 0x20,
            Self::Latency => 0x21,
            Self::PacketLoss => 0x22,
            Self::Jitter => 0x23,
            Self::ConnectionCount => 0x24,

            Self::BatteryLevel => 0x30,
            Self::Uptime => 0x31,
            Self::ErrorCount => 0x32,

            Self::DlThroughputNr700 => 0x40,
            Self::UlThroughputNr700 => 0x41,
            Self::RsrpNr700 => 0x42,
            Self::SinrNr700 => 0x43,

            Self::DlThroughputNr3500 => 0x50,
            Self::UlThroughputNr3500 => 0x51,
            Self::RsrpNr3500 => 0x52,
            Self::SinrNr3500 => 0x53,

            Self::PdcpThroughput => 0x60,
            Self::RlcThroughput => 0x61,
            Self::InitialBler => 0x62,
            Self::AvgMcs => 0x63,
            Self::RbPerSlot => 0x64,
            Self::RankIndicator => 0x65,

            Self::TxImbalance => 0x70,
            Self::LatencyPing => 0x71,
            Self::HandoverSuccessRate => 0x72,
            Self::InterferenceLevel => 0x73,

            Self::CaDlThroughput => 0x78,
            Self::CaUlThroughput => 0x79,

            Self::All => 0xFF,

            Self::Unknown(byte) => byte,
        }
    }

    /// Human-readable name, for logging. Unnamed codes return `"UNKNOWN"`.
    pub fn name(self) -> &'static str {
        match self {
            Self::CpuUsage => "CPU_USAGE",
            Self::MemoryUsage => "MEMORY_USAGE",
            Self::Temperature => "TEMPERATURE",
            Self::Humidity => "HUMIDITY",
            Self::FanSpeed => "FAN_SPEED",
            Self::Voltage => "VOLTAGE",
            Self::Current => "CURRENT",
            Self::Power => "POWER",

            Self::SignalStrength => "SIGNAL_STRENGTH",
            Self::SignalQuality => "SIGNAL_QUALITY",
            Self::Interference => "INTERFERENCE",
            Self::Ber => "BER",
            Self::Vswr => "VSWR",
            Self::AntennaTilt => "ANTENNA_TILT",

            Self::Throughput => "THROUGHPUT",
            Self::Latency => "LATENCY",
            Self::PacketLoss => "PACKET_LOSS",
            Self::Jitter => "JITTER",
            Self::ConnectionCount => "CONNECTION_COUNT",

            Self::BatteryLevel => "BATTERY_LEVEL",
            Self::Uptime => "UPTIME",
            Self::ErrorCount => "ERROR_COUNT",

            Self::DlThroughputNr700 => "DL_THROUGHPUT_NR700",
            Self::UlThroughputNr700 => "UL_THROUGHPUT_NR700",
            Self::RsrpNr700 => "RSRP_NR700",
            Self::SinrNr700 => "SINR_NR700",

            Self::DlThroughputNr3500 => "DL_THROUGHPUT_NR3500",
            Self::UlThroughputNr3500 => "UL_THROUGHPUT_NR3500",
            Self::RsrpNr3500 => "RSRP_NR3500",
            Self::SinrNr3500 => "SINR_NR3500",

            Self::PdcpThroughput => "PDCP_THROUGHPUT",
            Self::RlcThroughput => "RLC_THROUGHPUT",
            Self::InitialBler => "INITIAL_BLER",
            Self::AvgMcs => "AVG_MCS",
            Self::RbPerSlot => "RB_PER_SLOT",
            Self::RankIndicator => "RANK_INDICATOR",

            Self::TxImbalance => "TX_IMBALANCE",
            Self::LatencyPing => "LATENCY_PING",
            Self::HandoverSuccessRate => "HANDOVER_SUCCESS_RATE",
            Self::InterferenceLevel => "INTERFERENCE_LEVEL",

            Self::CaDlThroughput => "CA_DL_THROUGHPUT",
            Self::CaUlThroughput => "CA_UL_THROUGHPUT",

            Self::All => "ALL_METRICS",

            Self::Unknown(_) => "UNKNOWN",
        }
    }
}

/// A decoded (type, value) metric sample.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MetricRecord {
    pub metric_type: MetricType,
    pub value: f32,
}

impl MetricRecord {
    pub fn new(metric_type: MetricType, value: f32) -> Self {
        Self { metric_type, value }
    }

    fn encode_into(self, out: &mut [u8; METRIC_RECORD_SIZE]) {
        out[0] = self.metric_type.to_byte();
        out[1..5].copy_from_slice(&f32_to_be(self.value));
    }

    fn decode_from(bytes: &[u8]) -> Self {
        debug_assert!(bytes.len() >= METRIC_RECORD_SIZE);
        let metric_type = MetricType::from_byte(bytes[0]);
        let value = f32_from_be([bytes[1], bytes[2], bytes[3], bytes[4]]);
        Self { metric_type, value }
    }
}

/// Zero-copy iterator over packed 5-byte metric records in a payload.
///
/// Trailing bytes that cannot form a complete record (0 < leftover < 5)
/// are silently ignored, matching the wire contract.
#[derive(Debug, Clone)]
pub struct MetricsIter<'a> {
    remaining: &'a [u8],
}

impl<'a> Iterator for MetricsIter<'a> {
    type Item = MetricRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining.len() < METRIC_RECORD_SIZE {
            return None;
        }
        let (record, rest) = self.remaining.split_at(METRIC_RECORD_SIZE);
        self.remaining = rest;
        Some(MetricRecord::decode_from(record))
    }
}

/// Returns an iterator over the metric records packed into `payload`.
pub fn metrics_parse(payload: &[u8]) -> MetricsIter<'_> {
    MetricsIter { remaining: payload }
}

/// Writes `records` as packed 5-byte entries into `out`.
///
/// # Arguments
///
/// - `records` (`&[MetricRecord]`) - The (type, value) pairs to encode, in
///   order; each becomes one 5-byte record on the wire.
/// - `out` (`&mut [u8]`) - Destination buffer, at least
///   `5 * records.len()` bytes long.
///
/// # Returns
///
/// - `Result<usize, FrameError>` - The number of bytes written
///   (`5 * records.len()`) on success, or `FrameError::Overflow` if
///   `records.len()` would overflow the byte-count multiplication or
///   `out` is too small to hold the result.
pub fn metrics_build(records: &[MetricRecord], out: &mut [u8]) -> Result<usize, FrameError> {
    let needed = records
        .len()
        .checked_mul(METRIC_RECORD_SIZE)
        .ok_or(FrameError::Overflow)?;
    if out.len() < needed {
        return Err(FrameError::Overflow);
    }

    for (record, chunk) in records.iter().zip(out.chunks_exact_mut(METRIC_RECORD_SIZE)) {
        let mut entry = [0u8; METRIC_RECORD_SIZE];
        record.encode_into(&mut entry);
        chunk.copy_from_slice(&entry);
    }

    Ok(needed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_payload_yields_no_records() {
        assert_eq!(metrics_parse(&[]).count(), 0);
    }

    #[test]
    fn trailing_partial_record_is_ignored() {
        let mut buf = [0u8; METRIC_RECORD_SIZE + 3];
        MetricRecord::new(MetricType::Temperature, 55.0).encode_into(
            (&mut buf[..METRIC_RECORD_SIZE]).try_into().unwrap(),
        );
        let records: alloc::vec::Vec<_> = metrics_parse(&buf).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].metric_type, MetricType::Temperature);
    }

    #[test]
    fn round_trips_scenario_b() {
        let records = [
            MetricRecord::new(MetricType::Temperature, 55.0),
            MetricRecord::new(MetricType::CpuUsage, 25.0),
            MetricRecord::new(MetricType::SignalStrength, -75.0),
        ];
        let mut buf = [0u8; METRIC_RECORD_SIZE * 3];
        let written = metrics_build(&records, &mut buf).unwrap();
        assert_eq!(written, buf.len());

        let parsed: alloc::vec::Vec<_> = metrics_parse(&buf).collect();
        assert_eq!(parsed.len(), 3);
        for (expected, got) in records.iter().zip(parsed.iter()) {
            assert_eq!(expected.metric_type, got.metric_type);
            assert_eq!(expected.value, got.value);
        }
    }

    #[test]
    fn build_rejects_undersized_buffer() {
        let records = [MetricRecord::new(MetricType::Power, 1.0)];
        let mut tiny = [0u8; METRIC_RECORD_SIZE - 1];
        assert_eq!(metrics_build(&records, &mut tiny), Err(FrameError::Overflow));
    }

    #[test]
    fn unknown_type_round_trips_verbatim() {
        let raw = 0x9Bu8;
        assert_eq!(MetricType::from_byte(raw).to_byte(), raw);
        assert_eq!(MetricType::from_byte(raw).name(), "UNKNOWN");
    }

    #[test]
    fn named_types_round_trip() {
        for byte in 0x00u16..=0xFF {
            let byte = byte as u8;
            let t = MetricType::from_byte(byte);
            assert_eq!(t.to_byte(), byte);
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn build_then_parse_round_trips_any_records(
            pairs in proptest::collection::vec((any::<u8>(), any::<f32>()), 0..64)
        ) {
            let records: alloc::vec::Vec<MetricRecord> = pairs
                .iter()
                .map(|&(ty, val)| MetricRecord::new(MetricType::from_byte(ty), val))
                .collect();
            let mut buf = [0u8; METRIC_RECORD_SIZE * 64];
            let written = metrics_build(&records, &mut buf).unwrap();
            let parsed: alloc::vec::Vec<_> = metrics_parse(&buf[..written]).collect();

            prop_assert_eq!(parsed.len(), records.len());
            for (expected, got) in records.iter().zip(parsed.iter()) {
                prop_assert_eq!(expected.metric_type.to_byte(), got.metric_type.to_byte());
                prop_assert_eq!(expected.value.to_bits(), got.value.to_bits());
            }
        }

        #[test]
        fn trailing_partial_record_never_panics(
            full in proptest::collection::vec(any::<u8>(), 0..50),
            leftover in 1usize..METRIC_RECORD_SIZE,
        ) {
            let mut buf = full.clone();
            buf.truncate((buf.len() / METRIC_RECORD_SIZE) * METRIC_RECORD_SIZE);
            buf.extend(core::iter::repeat(0u8).take(leftover));
            let count = metrics_parse(&buf).count();
            prop_assert_eq!(count, buf.len() / METRIC_RECORD_SIZE);
        }
    }
}
