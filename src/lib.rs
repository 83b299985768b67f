//! Short, human-friendly, deterministic device identifiers.
//!
//! An identifier is derived once per process from the hardware MAC address or
//! from caller-supplied identity bytes (e.g. a public key), rendered in
//! Crockford Base32 with a trailing checksum symbol, and cached.
// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

/// Lazily initialized, thread-safe identity cache and MAC providers.
pub mod cache;
/// Handles configuration, config path resolution, and logging.
pub mod cfg;
/// Maps identity bytes to grouped, checksummed identifiers.
pub mod encoding;
/// Identifier, identity source and error types.
pub mod models;
