// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use core::fmt;

use serde::{Deserialize, Serialize};

/// Identifier encoding policy
///
/// The two policies produce different shapes and collision properties, so
/// the choice is always explicit. `Hashed` renders `XXXXX-XXXXX-XXX-C` from a
/// SHA-256 prefix; `Compact` renders `XXXX-XXXC` from a CRC-32 of the
/// identity alone (the namespace is not mixed in).
#[derive(Deserialize, Serialize, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodingPolicy {
    #[default]
    #[serde(
        rename = "Hashed",
        alias = "hashed",
        alias = "HASHED",
        alias = "sha256",
        alias = "SHA256"
    )]
    Hashed,
    #[serde(
        rename = "Compact",
        alias = "compact",
        alias = "COMPACT",
        alias = "crc32",
        alias = "CRC32"
    )]
    Compact,
}
impl fmt::Display for EncodingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EncodingPolicy::Hashed => "Hashed",
            EncodingPolicy::Compact => "Compact",
        })
    }
}

/// How the custom identity in the config file is written.
#[derive(Deserialize, Serialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum IdentityFormat {
    /// UTF-8 text, used as-is.
    #[default]
    #[serde(rename = "Text", alias = "text", alias = "TEXT")]
    Text,
    /// Hex string, e.g. a public key.
    #[serde(rename = "Hex", alias = "hex", alias = "HEX")]
    Hex,
}
impl fmt::Display for IdentityFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IdentityFormat::Text => "Text",
            IdentityFormat::Hex => "Hex",
        })
    }
}
