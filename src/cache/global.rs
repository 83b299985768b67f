// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Process-wide identity cache and the flat API over it.
//!
//! Code that can take an [`IdentityCache`] by reference should do so; these
//! functions exist for callers that cannot thread one through.

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::{
    cache::{identity_cache::IdentityCache, mac::SystemMac},
    models::{error::NodeIdError, node_id::NodeId, source::IdentitySource},
};

static GLOBAL: OnceCell<IdentityCache<SystemMac>> = OnceCell::new();

/// Installs `cache` as the process-wide instance.
///
/// Only succeeds before the first call to [`global`] (directly or through
/// the functions below); otherwise `cache` is handed back.
pub fn install(cache: IdentityCache<SystemMac>) -> Result<(), IdentityCache<SystemMac>> {
    GLOBAL.set(cache)
}

/// The process-wide cache, created with defaults on first use.
pub fn global() -> &'static IdentityCache<SystemMac> {
    GLOBAL.get_or_init(|| IdentityCache::new(SystemMac))
}

/// Current identifier and its length, initializing from the MAC if needed.
pub fn get_node_id() -> Result<(Arc<NodeId>, usize), NodeIdError> {
    let id = global().get()?;
    let len = id.len();
    Ok((id, len))
}

/// Initializes from `identity`, or from the hardware MAC when `None`. No-op
/// once initialized.
///
/// Empty `identity` bytes are rejected with [`NodeIdError::InvalidArgument`]
/// rather than hashing the namespace alone; like any source, they are not
/// looked at once a value is cached.
pub fn node_id_init(identity: Option<&[u8]>) -> Result<(), NodeIdError> {
    global().ensure_initialized(IdentitySource::from_optional(identity))
}

/// Replaces the identifier with one derived from `identity`.
pub fn node_id_force_init(identity: &[u8]) -> Result<(), NodeIdError> {
    global().force_init(IdentitySource::custom(identity))
}
