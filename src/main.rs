// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use anyhow::{Context, Result};
use node_id::{
    cache::{
        global::{self, get_node_id, node_id_init},
        identity_cache::IdentityCache,
        mac::{FixedMac, SystemMac},
    },
    cfg::{
        cli::{CONFIG_ENV, LOGGER_CONFIG_ENV, config_path_from_env, resolve_config_path},
        config::Config,
        logger::init_logger,
    },
};
use tracing::{error, info, warn};

fn main() -> Result<()> {
    let _init_logger = init_logger(&config_path_from_env(
        LOGGER_CONFIG_ENV,
        "tests/config_logger.yaml",
    ))?;

    let config = resolve_config_path(&config_path_from_env(CONFIG_ENV, "tests/config.yaml"))
        .and_then(Config::load_from_file)
        .context("failed to resolve or load config")?;
    let node_cfg = &config.node_id;

    // A configured MAC is printed-label material for hosts whose interface
    // list is not authoritative; it goes through a private cache.
    if let Some(mac) = node_cfg.fixed_mac()? {
        let cache = IdentityCache::with_config(FixedMac(mac), node_cfg);
        cache.ensure_initialized(node_cfg.source()?)?;
        let id = cache.get()?;
        info!(node_id = %id, len = id.len(), policy = %cache.policy(), "Node ID (fixed MAC)");
        return Ok(());
    }

    if global::install(IdentityCache::with_config(SystemMac, node_cfg)).is_err() {
        warn!("process-wide node id cache was already initialized");
    }

    let custom = node_cfg.identity_bytes()?;
    if let Err(e) = node_id_init(custom.as_deref()) {
        error!(error = %e, "Failed to initialize node id");
        return Err(e.into());
    }

    match get_node_id() {
        Ok((id, len)) => info!(node_id = %id, len, "Node ID"),
        Err(e) => {
            error!(error = %e, "Failed to get node id");
            return Err(e.into());
        },
    }

    Ok(())
}
