// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use thiserror::Error;

/// Closed set of failures returned by the encoder and the identity cache.
///
/// None of these are retried internally; the caller decides whether to call
/// again later.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeIdError {
    /// An identity was required but missing or empty.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The scratch buffer for `namespace || identity` could not be reserved.
    #[error("out of memory while preparing identity for hashing")]
    ResourceExhausted,

    /// The hardware MAC address could not be read.
    #[error("hardware MAC address unavailable: {0}")]
    HardwareUnavailable(String),

    /// The cache mutex was poisoned by a panicking holder.
    #[error("node id lock poisoned")]
    LockFailure,

    /// Text handed to [`NodeId::parse`](crate::models::node_id::NodeId::parse)
    /// does not have either identifier shape.
    #[error("malformed node id: {0:?}")]
    InvalidFormat(String),

    /// The trailing checksum symbol does not match the payload.
    #[error("node id checksum mismatch: expected '{expected}', found '{found}'")]
    ChecksumMismatch { expected: char, found: char },
}
