// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Environment variable overriding the node id config path.
pub const CONFIG_ENV: &str = "NODE_ID_CONFIG";
/// Environment variable overriding the logger config path.
pub const LOGGER_CONFIG_ENV: &str = "NODE_ID_LOGGER_CONFIG";

/// Absolute, canonical form of `rel` (relative paths resolve against the
/// working directory). Fails if the file does not exist.
pub fn resolve_config_path(rel: &str) -> Result<PathBuf> {
    let p = Path::new(rel);

    let abs = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()
            .context("cannot get current working dir")?
            .join(p)
    };

    abs.canonicalize()
        .with_context(|| format!("failed to canonicalize path {abs:?}"))
}

/// Value of `var` if set and non-empty, else `default`.
pub fn config_path_from_env(var: &str, default: &str) -> String {
    std::env::var(var)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
