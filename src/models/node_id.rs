// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use core::{fmt, str::FromStr};

use crate::{
    encoding::{EncodingPolicy, alphabet},
    models::error::NodeIdError,
};

/// Capacity of the identifier buffer. Every policy's output fits.
pub const NODE_ID_MAX_LEN: usize = 20;

const SEPARATOR: u8 = b'-';

/// A rendered identifier such as `32269-RF125-VFG-B`.
///
/// Stored inline in a fixed buffer; the content is always ASCII drawn from
/// the Crockford alphabet plus `-`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    buf: [u8; NODE_ID_MAX_LEN],
    len: u8,
}

impl NodeId {
    /// Renders payload symbol indices followed by the checksum index, with a
    /// separator after each group but the last.
    pub(crate) fn from_indices(payload: &[u8], checksum: u8, groups: &[usize]) -> Self {
        let mut id = NodeId {
            buf: [0u8; NODE_ID_MAX_LEN],
            len: 0,
        };
        let mut symbols = payload
            .iter()
            .copied()
            .chain(core::iter::once(checksum))
            .map(alphabet::symbol);

        for (g, &width) in groups.iter().enumerate() {
            if g > 0 {
                id.push(SEPARATOR);
            }
            for s in symbols.by_ref().take(width) {
                id.push(s);
            }
        }
        id
    }

    #[inline]
    fn push(&mut self, c: u8) {
        let at = self.len as usize;
        debug_assert!(at < NODE_ID_MAX_LEN, "node id buffer overflow");
        if at < NODE_ID_MAX_LEN {
            self.buf[at] = c;
            self.len += 1;
        }
    }

    /// Parses and validates a printed identifier of either shape.
    ///
    /// Lower-case and the Crockford aliases `I`, `L` (for `1`) and `O` (for
    /// `0`) are accepted; the returned value is in canonical form.
    pub fn parse(text: &str) -> Result<Self, NodeIdError> {
        let malformed = || NodeIdError::InvalidFormat(text.to_string());

        let policy = EncodingPolicy::from_encoded_len(text.len()).ok_or_else(malformed)?;
        let groups: Vec<&str> = text.split('-').collect();
        let widths = policy.groups();
        if groups.len() != widths.len()
            || groups.iter().zip(widths).any(|(g, &w)| g.len() != w)
        {
            return Err(malformed());
        }

        let indices = groups
            .concat()
            .bytes()
            .map(alphabet::decode_symbol)
            .collect::<Option<Vec<u8>>>()
            .ok_or_else(malformed)?;
        let Some((&found, payload)) = indices.split_last() else {
            return Err(malformed());
        };

        let expected = policy.checksum_of_payload(payload).ok_or_else(malformed)?;
        if expected != found {
            return Err(NodeIdError::ChecksumMismatch {
                expected: alphabet::symbol(expected) as char,
                found: alphabet::symbol(found) as char,
            });
        }

        Ok(Self::from_indices(payload, found, widths))
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }

    pub fn as_str(&self) -> &str {
        core::str::from_utf8(self.as_bytes()).unwrap_or_default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The trailing checksum symbol.
    pub fn checksum(&self) -> Option<char> {
        self.as_bytes().last().map(|&c| c as char)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.as_str())
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl FromStr for NodeId {
    type Err = NodeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
