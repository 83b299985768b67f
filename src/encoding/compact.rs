// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! CRC backed identifier: `XXXX-XXXC`.
//!
//! Meant for devices where only the MAC is available and a 9-character label
//! is preferred over collision resistance. `CRC-32/ISO-HDLC` of the identity
//! bytes alone (no namespace) is written as 7 symbols (35 bits of room). The
//! checksum symbol is `CRC-8/SMBUS` over those 7 ASCII symbols, folded to five
//! bits and never zero.

use crc::{CRC_8_SMBUS, CRC_32_ISO_HDLC, Crc};

use crate::{
    encoding::alphabet,
    models::{error::NodeIdError, node_id::NodeId},
};

const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);
const CRC8: Crc<u8> = Crc::<u8>::new(&CRC_8_SMBUS);

/// Payload symbols before the checksum.
pub const PAYLOAD_SYMBOLS: usize = 7;
/// Group widths of the rendered identifier; the checksum closes the last group.
pub const GROUPS: &[usize] = &[4, 4];
/// Rendered length: 7 payload + 1 checksum + 1 separator.
pub const ENCODED_LEN: usize = 9;

/// Encodes `identity`; the CRC takes the identity bytes only.
pub fn encode(identity: &[u8]) -> Result<NodeId, NodeIdError> {
    let crc = CRC32.checksum(identity);

    let mut payload = [0u8; PAYLOAD_SYMBOLS];
    alphabet::to_indices(crc as u64, &mut payload);

    Ok(NodeId::from_indices(&payload, fold_checksum(&payload), GROUPS))
}

/// Recomputes the checksum index from the 7 payload indices of a parsed id.
pub(crate) fn checksum_of_payload(payload: &[u8]) -> Option<u8> {
    if payload.len() != PAYLOAD_SYMBOLS || alphabet::from_indices(payload)? > u32::MAX as u64 {
        return None;
    }
    Some(fold_checksum(payload))
}

fn fold_checksum(payload: &[u8]) -> u8 {
    let mut ascii = [0u8; PAYLOAD_SYMBOLS];
    for (dst, &idx) in ascii.iter_mut().zip(payload) {
        *dst = alphabet::symbol(idx);
    }
    let c = CRC8.checksum(&ascii);
    match (c ^ (c >> 5)) & 0x1F {
        // '0' in the checksum slot reads as a blank on printed labels
        0 => 1,
        f => f,
    }
}
