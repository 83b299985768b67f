// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{
    panic::{self, AssertUnwindSafe},
    sync::atomic::Ordering,
};

use tracing::Level;

use anyhow::Result;
use node_id::{
    cache::{identity_cache::IdentityCache, mac::MacProvider},
    encoding::{DEFAULT_NAMESPACE, EncodingPolicy, encode},
    models::{error::NodeIdError, source::IdentitySource},
};

use super::common::{CountingMac, LogCapture};

fn custom(bytes: &[u8]) -> IdentitySource {
    IdentitySource::custom(bytes)
}

#[test]
fn test_default_init_reads_mac_once() -> Result<()> {
    let cache = IdentityCache::new(CountingMac::default());

    cache.ensure_initialized(IdentitySource::Default)?;
    let first = cache.get()?;
    cache.ensure_initialized(IdentitySource::Default)?;
    let second = cache.get()?;

    assert_eq!(first, second);
    assert_eq!(first.as_str(), "1J17T-BAH88-YER-1");
    assert_eq!(cache.provider().reads(), 1);
    Ok(())
}

#[test]
fn test_get_initializes_lazily() -> Result<()> {
    let cache = IdentityCache::new(CountingMac::default());
    assert!(!cache.is_initialized()?);
    assert_eq!(cache.provider().reads(), 0);

    let id = cache.get()?;
    assert!(cache.is_initialized()?);
    assert_eq!(id.len(), 17);
    assert_eq!(cache.provider().reads(), 1);
    Ok(())
}

#[test]
fn test_initialized_cache_ignores_new_source() -> Result<()> {
    let cache = IdentityCache::new(CountingMac::default());
    cache.ensure_initialized(custom(b"first"))?;
    cache.ensure_initialized(custom(b"second"))?;
    cache.ensure_initialized(IdentitySource::Default)?;

    assert_eq!(
        *cache.get()?,
        encode(EncodingPolicy::Hashed, DEFAULT_NAMESPACE.as_bytes(), b"first")?
    );
    assert_eq!(cache.provider().reads(), 0);
    Ok(())
}

#[test]
fn test_mac_failure_is_reported_and_retryable() -> Result<()> {
    let cache = IdentityCache::new(CountingMac::failing());

    assert!(matches!(
        cache.ensure_initialized(IdentitySource::Default),
        Err(NodeIdError::HardwareUnavailable(_))
    ));
    assert!(matches!(cache.get(), Err(NodeIdError::HardwareUnavailable(_))));
    assert!(!cache.is_initialized()?);

    cache.provider().failing.store(false, Ordering::SeqCst);
    cache.ensure_initialized(IdentitySource::Default)?;
    assert!(cache.is_initialized()?);
    assert_eq!(cache.provider().reads(), 3);
    Ok(())
}

#[test]
fn test_force_init_overrides_and_changes() -> Result<()> {
    let cache = IdentityCache::new(CountingMac::default());
    let _ = cache.get()?;

    cache.force_init(custom(b"CUSTOM_IDENTITY"))?;
    let a = cache.get()?;
    assert_eq!(a.as_str(), "32269-RF125-VFG-B");

    cache.force_init(custom(b"TEST_CUSTOM_IDENTITY"))?;
    let b = cache.get()?;
    assert_eq!(b.as_str(), "14WEJ-8REDS-3SD-1");
    assert_ne!(a, b);

    // earlier handle still reads its own value
    assert_eq!(a.as_str(), "32269-RF125-VFG-B");
    Ok(())
}

#[test]
fn test_force_init_on_empty_cache() -> Result<()> {
    let cache = IdentityCache::new(CountingMac::default());
    cache.force_init(custom(b"CUSTOM_IDENTITY"))?;
    assert_eq!(cache.get()?.as_str(), "32269-RF125-VFG-B");
    assert_eq!(cache.provider().reads(), 0);
    Ok(())
}

#[test]
fn test_empty_custom_init_is_rejected() -> Result<()> {
    let cache = IdentityCache::new(CountingMac::default());
    assert_eq!(
        cache.ensure_initialized(custom(b"")),
        Err(NodeIdError::InvalidArgument("identity must not be empty"))
    );
    assert!(!cache.is_initialized()?);
    assert_eq!(cache.provider().reads(), 0);
    Ok(())
}

#[test]
fn test_failed_force_keeps_last_good_value() -> Result<()> {
    let cache = IdentityCache::new(CountingMac::default());
    cache.force_init(custom(b"CUSTOM_IDENTITY"))?;
    let before = cache.get()?;

    assert!(matches!(
        cache.force_init(custom(b"")),
        Err(NodeIdError::InvalidArgument(_))
    ));
    assert!(matches!(
        cache.force_init(IdentitySource::Default),
        Err(NodeIdError::InvalidArgument(_))
    ));

    let after = cache.get()?;
    assert_eq!(before, after);
    assert_eq!(after.as_str(), "32269-RF125-VFG-B");
    Ok(())
}

#[test]
fn test_policy_and_namespace_are_applied() -> Result<()> {
    let cache = IdentityCache::new(CountingMac::default())
        .with_policy(EncodingPolicy::Compact)
        .with_namespace("FLEET_A");
    cache.force_init(custom(b"CUSTOM_IDENTITY"))?;
    // the namespace only feeds the hashed policy
    assert_eq!(cache.get()?.as_str(), "1Q5Q-J50M");
    assert_eq!(cache.policy(), EncodingPolicy::Compact);
    assert_eq!(cache.namespace(), b"FLEET_A");
    Ok(())
}

struct PanickingMac;

impl MacProvider for PanickingMac {
    fn hardware_mac(&self) -> Result<[u8; 6], NodeIdError> {
        panic!("driver fault");
    }
}

#[test]
fn test_poisoned_lock_is_lock_failure() {
    let cache = IdentityCache::new(PanickingMac);
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| cache.get()));
    assert!(outcome.is_err());

    assert_eq!(cache.get(), Err(NodeIdError::LockFailure));
    assert_eq!(
        cache.force_init(custom(b"CUSTOM_IDENTITY")),
        Err(NodeIdError::LockFailure)
    );
    // poisoned is not the same as empty
    assert_eq!(cache.is_initialized(), Err(NodeIdError::LockFailure));
}

#[test]
fn test_force_init_diagnostics() -> Result<()> {
    let logs = LogCapture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(Level::TRACE)
        .finish();

    tracing::subscriber::with_default(subscriber, || -> Result<()> {
        let cache = IdentityCache::new(CountingMac::default());
        cache.force_init(custom(b"CUSTOM_IDENTITY"))?;
        logs.take();

        // same value: only the unconditional warning
        cache.force_init(custom(b"CUSTOM_IDENTITY"))?;
        let out = logs.take();
        assert!(out.contains("WARN"), "{out}");
        assert!(out.contains("replacing cached node id"), "{out}");
        assert!(!out.contains("node id changed"), "{out}");

        // new value: warning plus previous and current
        cache.force_init(custom(b"TEST_CUSTOM_IDENTITY"))?;
        let out = logs.take();
        assert!(out.contains("replacing cached node id"), "{out}");
        assert!(out.contains("node id changed"), "{out}");
        assert!(out.contains("previous=32269-RF125-VFG-B"), "{out}");
        assert!(out.contains("current=14WEJ-8REDS-3SD-1"), "{out}");

        // rejected before the lock: nothing logged
        assert!(cache.force_init(custom(b"")).is_err());
        assert!(cache.force_init(IdentitySource::Default).is_err());
        let out = logs.take();
        assert!(!out.contains("replacing cached node id"), "{out}");
        assert!(!out.contains("node id changed"), "{out}");
        Ok(())
    })
}
