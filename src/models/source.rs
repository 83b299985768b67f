// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use core::fmt;

/// Where the identity bytes for a [`NodeId`](crate::models::node_id::NodeId)
/// come from.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum IdentitySource {
    /// The hardware MAC address of the primary interface.
    #[default]
    Default,
    /// Caller-supplied bytes, e.g. a public key.
    Custom(Vec<u8>),
}

impl IdentitySource {
    pub fn custom(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Custom(bytes.into())
    }

    /// `None` selects the hardware MAC, `Some` the given bytes.
    pub fn from_optional(bytes: Option<&[u8]>) -> Self {
        match bytes {
            Some(b) => Self::Custom(b.to_vec()),
            None => Self::Default,
        }
    }

    #[inline]
    pub fn is_default(&self) -> bool {
        matches!(self, IdentitySource::Default)
    }

    /// Custom bytes, if any.
    pub fn custom_bytes(&self) -> Option<&[u8]> {
        match self {
            IdentitySource::Default => None,
            IdentitySource::Custom(b) => Some(b),
        }
    }
}

impl fmt::Debug for IdentitySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentitySource::Default => write!(f, "IdentitySource::Default"),
            IdentitySource::Custom(b) => {
                write!(f, "IdentitySource::Custom({})", hex::encode(b))
            },
        }
    }
}

impl From<&[u8]> for IdentitySource {
    fn from(b: &[u8]) -> Self {
        Self::Custom(b.to_vec())
    }
}

impl From<Vec<u8>> for IdentitySource {
    fn from(b: Vec<u8>) -> Self {
        Self::Custom(b)
    }
}
