//! This module defines the identifier, identity source and error types.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

/// Defines the closed error enumeration.
pub mod error;
/// Defines the fixed-capacity identifier buffer and its parser.
pub mod node_id;
/// Defines where identity bytes come from.
pub mod source;
