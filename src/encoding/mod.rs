//! Pure mapping from identity bytes to a grouped, checksummed identifier.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

/// Crockford Base32 symbol table and bit packing.
pub mod alphabet;
/// CRC-32 / CRC-8 variant producing `XXXX-XXXC`.
pub mod compact;
/// SHA-256 variant producing `XXXXX-XXXXX-XXX-C`.
pub mod hashed;

pub use crate::cfg::enums::EncodingPolicy;
use crate::models::{error::NodeIdError, node_id::NodeId};

/// Namespace mixed in front of every hashed identity unless configured
/// otherwise.
pub const DEFAULT_NAMESPACE: &str = "PH_NODE_ID";

/// Encodes `identity` under `namespace` with the selected policy.
///
/// The result depends only on `(policy, namespace, identity)`; `Compact`
/// does not mix in the namespace, its CRC covers the identity alone. Fails with
/// [`NodeIdError::InvalidArgument`] for an empty identity and with
/// [`NodeIdError::ResourceExhausted`] if the scratch buffer cannot be
/// allocated.
pub fn encode(
    policy: EncodingPolicy,
    namespace: &[u8],
    identity: &[u8],
) -> Result<NodeId, NodeIdError> {
    if identity.is_empty() {
        return Err(NodeIdError::InvalidArgument("identity must not be empty"));
    }
    match policy {
        EncodingPolicy::Hashed => hashed::encode(namespace, identity),
        EncodingPolicy::Compact => compact::encode(identity),
    }
}

impl EncodingPolicy {
    /// Identity bytes used for a hardware MAC under this policy.
    ///
    /// `Hashed` hashes the upper-case, colon separated text form
    /// (`AA:BB:CC:DD:EE:FF`) so ids match devices already in the field;
    /// `Compact` hashes the raw six bytes.
    pub fn mac_identity(self, mac: [u8; 6]) -> Vec<u8> {
        match self {
            EncodingPolicy::Hashed => format_mac(mac).into_bytes(),
            EncodingPolicy::Compact => mac.to_vec(),
        }
    }

    /// Length of every identifier produced by this policy.
    pub const fn encoded_len(self) -> usize {
        match self {
            EncodingPolicy::Hashed => hashed::ENCODED_LEN,
            EncodingPolicy::Compact => compact::ENCODED_LEN,
        }
    }

    pub(crate) const fn groups(self) -> &'static [usize] {
        match self {
            EncodingPolicy::Hashed => hashed::GROUPS,
            EncodingPolicy::Compact => compact::GROUPS,
        }
    }

    pub(crate) fn checksum_of_payload(self, payload: &[u8]) -> Option<u8> {
        match self {
            EncodingPolicy::Hashed => hashed::checksum_of_payload(payload),
            EncodingPolicy::Compact => compact::checksum_of_payload(payload),
        }
    }

    /// Policy whose identifiers have `len` characters.
    pub(crate) fn from_encoded_len(len: usize) -> Option<Self> {
        [EncodingPolicy::Hashed, EncodingPolicy::Compact]
            .into_iter()
            .find(|p| p.encoded_len() == len)
    }
}

/// `AA:BB:CC:DD:EE:FF`
pub fn format_mac(mac: [u8; 6]) -> String {
    mac.iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(":")
}

/// `namespace || identity` in a buffer reserved without aborting on OOM.
pub(crate) fn scratch_concat(
    namespace: &[u8],
    identity: &[u8],
) -> Result<Vec<u8>, NodeIdError> {
    let total = namespace
        .len()
        .checked_add(identity.len())
        .ok_or(NodeIdError::ResourceExhausted)?;
    let mut buf = Vec::new();
    buf.try_reserve_exact(total)
        .map_err(|_| NodeIdError::ResourceExhausted)?;
    buf.extend_from_slice(namespace);
    buf.extend_from_slice(identity);
    Ok(buf)
}
