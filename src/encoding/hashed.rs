// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! SHA-256 backed identifier: `XXXXX-XXXXX-XXX-C`.
//!
//! The first 8 bytes of `SHA-256(namespace || identity)` are read as a
//! big-endian `u64` and written as 13 symbols (65 bits of room, the top bit
//! is always zero). The checksum is the byte sum of those 8 bytes modulo 37,
//! folded into the alphabet with `% 32`.

use sha2::{Digest, Sha256};

use crate::{
    encoding::{alphabet, scratch_concat},
    models::{error::NodeIdError, node_id::NodeId},
};

/// Payload symbols before the checksum.
pub const PAYLOAD_SYMBOLS: usize = 13;
/// Group widths of the rendered identifier, checksum group last.
pub const GROUPS: &[usize] = &[5, 5, 3, 1];
/// Rendered length: 13 payload + 1 checksum + 3 separators.
pub const ENCODED_LEN: usize = 17;

const PREFIX_BYTES: usize = 8;

/// Encodes `namespace || identity`.
pub fn encode(namespace: &[u8], identity: &[u8]) -> Result<NodeId, NodeIdError> {
    let scratch = scratch_concat(namespace, identity)?;
    let hash = Sha256::digest(&scratch);

    let mut prefix = [0u8; PREFIX_BYTES];
    prefix.copy_from_slice(&hash[..PREFIX_BYTES]);

    let mut payload = [0u8; PAYLOAD_SYMBOLS];
    alphabet::to_indices(u64::from_be_bytes(prefix), &mut payload);

    Ok(NodeId::from_indices(&payload, mod37(&prefix), GROUPS))
}

/// Recomputes the checksum index from the 13 payload indices of a parsed id.
pub(crate) fn checksum_of_payload(payload: &[u8]) -> Option<u8> {
    if payload.len() != PAYLOAD_SYMBOLS {
        return None;
    }
    let value = alphabet::from_indices(payload)?;
    Some(mod37(&value.to_be_bytes()))
}

/// Byte sum modulo 37, then `% 32`. Zero is a legal result here.
fn mod37(prefix: &[u8; PREFIX_BYTES]) -> u8 {
    let sum = prefix.iter().fold(0u32, |s, &b| (s + b as u32) % 37);
    (sum % 32) as u8
}
