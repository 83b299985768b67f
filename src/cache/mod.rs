//! Lazily initialized, thread-safe cache of the node identifier.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

/// Process-wide instance and flat `get_node_id` / `node_id_init` API.
pub mod global;
/// The cache itself: lazy init, forced re-init, snapshot reads.
pub mod identity_cache;
/// Hardware MAC providers.
pub mod mac;
