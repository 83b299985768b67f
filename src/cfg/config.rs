// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{fs, path::Path};

use anyhow::{Context, Result, bail, ensure};
use serde::{Deserialize, Serialize};

use crate::{
    cfg::enums::{EncodingPolicy, IdentityFormat},
    encoding::DEFAULT_NAMESPACE,
    models::source::IdentitySource,
};

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Config {
    /// How identifiers are derived.
    #[serde(rename = "NodeId", default)]
    pub node_id: NodeIdConfig,
}

/// Encoding choice plus the identity to derive from.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct NodeIdConfig {
    #[serde(rename = "Encoding", default)]
    /// `Hashed` (`XXXXX-XXXXX-XXX-C`) or `Compact` (`XXXX-XXXC`).
    pub encoding: EncodingPolicy,

    #[serde(rename = "Namespace", default = "default_namespace")]
    /// Prefix mixed into every identity before hashing. Only the `Hashed`
    /// policy uses it; `Compact` covers the identity bytes alone.
    pub namespace: String,

    #[serde(rename = "Identity", default, skip_serializing_if = "Option::is_none")]
    /// Custom identity; the hardware MAC is used when absent.
    pub identity: Option<String>,

    #[serde(rename = "IdentityFormat", default)]
    /// How `Identity` is written.
    pub identity_format: IdentityFormat,

    #[serde(rename = "MacAddress", default, skip_serializing_if = "Option::is_none")]
    /// Fixed MAC (`AA:BB:CC:DD:EE:FF`) used instead of reading the interface.
    pub mac_address: Option<String>,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

impl Default for NodeIdConfig {
    fn default() -> Self {
        Self {
            encoding: EncodingPolicy::default(),
            namespace: default_namespace(),
            identity: None,
            identity_format: IdentityFormat::default(),
            mac_address: None,
        }
    }
}

impl Config {
    /// Loads the configuration from YAML, validates it, and returns the
    /// ready-to-use value.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = fs::read_to_string(path)?;
        Self::from_yaml(&s)
    }

    pub fn from_yaml(s: &str) -> Result<Self> {
        let mut cfg: Config =
            serde_yaml::from_str(s).context("failed to parse config YAML")?;
        cfg.validate_and_normalize()?;
        Ok(cfg)
    }

    /// Validates invariants and normalizes derived fields.
    pub fn validate_and_normalize(&mut self) -> Result<()> {
        let node = &mut self.node_id;

        let trimmed = node.namespace.trim();
        if trimmed.len() != node.namespace.len() {
            node.namespace = trimmed.to_string();
        }
        ensure!(!node.namespace.is_empty(), "Namespace must not be empty");
        ensure!(node.namespace.is_ascii(), "Namespace must be ASCII");

        // An empty Identity means "use the MAC".
        if node.identity.as_deref().is_some_and(str::is_empty) {
            node.identity = None;
        }
        if node.identity.is_some() {
            node.identity_bytes()?;
        }

        if let Some(mac) = node.mac_address.as_deref() {
            parse_mac(mac).with_context(|| format!("invalid MacAddress {mac:?}"))?;
        }

        Ok(())
    }
}

impl NodeIdConfig {
    /// Decoded custom identity, if configured.
    pub fn identity_bytes(&self) -> Result<Option<Vec<u8>>> {
        let Some(raw) = self.identity.as_deref() else {
            return Ok(None);
        };
        let bytes = match self.identity_format {
            IdentityFormat::Text => raw.as_bytes().to_vec(),
            IdentityFormat::Hex => {
                hex::decode(raw.trim()).context("Identity is not valid hex")?
            },
        };
        ensure!(!bytes.is_empty(), "Identity must not be empty");
        Ok(Some(bytes))
    }

    /// The identity source this config selects.
    pub fn source(&self) -> Result<IdentitySource> {
        Ok(IdentitySource::from_optional(self.identity_bytes()?.as_deref()))
    }

    /// Configured fixed MAC, if any.
    pub fn fixed_mac(&self) -> Result<Option<[u8; 6]>> {
        self.mac_address.as_deref().map(parse_mac).transpose()
    }
}

/// Parses `AA:BB:CC:DD:EE:FF` (also `-` separated, any case).
pub fn parse_mac(s: &str) -> Result<[u8; 6]> {
    let parts: Vec<&str> = s.trim().split([':', '-']).collect();
    if parts.len() != 6 {
        bail!("expected six octets, got {}", parts.len());
    }

    let mut mac = [0u8; 6];
    for (dst, part) in mac.iter_mut().zip(parts) {
        ensure!(
            part.len() == 2 && part.bytes().all(|b| b.is_ascii_hexdigit()),
            "octet {part:?} must be two hex digits"
        );
        *dst = u8::from_str_radix(part, 16)
            .with_context(|| format!("octet {part:?} is not hex"))?;
    }
    Ok(mac)
}
