//! Errors raised while validating layouts and copying records.

use core::ops::Range;

/// Errors produced by descriptor validation, the self-check and the copy engine.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error(
        "range pairs do not match field count {field_count}: wire has {wire_pairs}, host has {host_pairs}"
    )]
    PairCountMismatch {
        field_count: usize,
        wire_pairs: usize,
        host_pairs: usize,
    },

    #[error("field {field}: wire length {wire} differs from host length {host}")]
    FieldLengthMismatch {
        field: usize,
        wire: usize,
        host: usize,
    },

    #[error("field {field}: host range starts at {start} but ends at {end}")]
    HostRangeReversed {
        field: usize,
        start: usize,
        end: usize,
    },

    #[error("field {field}: host range {range:?} exceeds host size {host_size}")]
    HostRangeOutOfBounds {
        field: usize,
        range: Range<usize>,
        host_size: usize,
    },

    #[error("field {field}: wire range {range:?} exceeds wire length {wire_length}")]
    WireRangeOutOfBounds {
        field: usize,
        range: Range<usize>,
        wire_length: usize,
    },

    #[error("fields {first} and {second} overlap in the wire buffer")]
    WireOverlap { first: usize, second: usize },

    #[error("fields {first} and {second} overlap in the host record")]
    HostOverlap { first: usize, second: usize },

    #[error("wire byte {offset} is not covered by any field (wire length {wire_length})")]
    WireGap { offset: usize, wire_length: usize },

    #[error("layout expects `{record}` to be {expected} bytes, compiled size is {actual}")]
    HostSizeMismatch {
        record: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("wire buffer too short: need {required} bytes, got {actual}")]
    WireBufferTooShort { required: usize, actual: usize },

    #[error("host buffer too short: need {required} bytes, got {actual}")]
    HostBufferTooShort { required: usize, actual: usize },

    #[error("descriptor record truncated: need {required} bytes, got {actual}")]
    TruncatedDescriptor { required: usize, actual: usize },

    #[error("descriptor record has {extra} trailing bytes")]
    TrailingBytes { extra: usize },

    #[error("descriptor field count {field_count} is too large")]
    FieldCountTooLarge { field_count: u32 },
}

pub type Result<T> = std::result::Result<T, LayoutError>;
