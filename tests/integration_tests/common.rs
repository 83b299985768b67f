// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use node_id::{
    encoding::{DEFAULT_NAMESPACE, EncodingPolicy, encode},
    models::node_id::NodeId,
};

pub fn hashed(identity: &[u8]) -> NodeId {
    encode(EncodingPolicy::Hashed, DEFAULT_NAMESPACE.as_bytes(), identity)
        .expect("non-empty identity always encodes")
}

/// `XXXXX-XXXXX-XXX-C` over the Crockford alphabet.
pub fn is_hashed_shape(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 17
        && b.iter().enumerate().all(|(i, &c)| match i {
            5 | 11 | 15 => c == b'-',
            _ => c.is_ascii_digit() || (c.is_ascii_uppercase() && !b"ILOU".contains(&c)),
        })
}
