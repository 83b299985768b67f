// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use core::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info, warn};

use crate::{
    cache::mac::{MacProvider, SystemMac},
    cfg::config::NodeIdConfig,
    encoding::{DEFAULT_NAMESPACE, EncodingPolicy, encode},
    models::{error::NodeIdError, node_id::NodeId, source::IdentitySource},
};

type Slot = Option<Arc<NodeId>>;

/// Lazily computed node identifier shared by everything in the process that
/// needs it.
///
/// The cached value is an immutable [`Arc<NodeId>`] snapshot. A forced
/// re-initialization swaps in a new snapshot; handles returned earlier keep
/// reading the value they were given.
///
/// ```text
///   Uninitialized ──ensure_initialized / get──▶ Initialized
///                                                 │    ▲
///                                                 └────┘ force_init
/// ```
pub struct IdentityCache<P = SystemMac> {
    policy: EncodingPolicy,
    namespace: Vec<u8>,
    provider: P,
    slot: Mutex<Slot>,
}

impl<P: MacProvider> IdentityCache<P> {
    /// Empty cache with the `Hashed` policy and the default namespace.
    pub fn new(provider: P) -> Self {
        Self {
            policy: EncodingPolicy::default(),
            namespace: DEFAULT_NAMESPACE.as_bytes().to_vec(),
            provider,
            slot: Mutex::new(None),
        }
    }

    /// Empty cache using the policy and namespace from `cfg`.
    pub fn with_config(provider: P, cfg: &NodeIdConfig) -> Self {
        Self::new(provider)
            .with_policy(cfg.encoding)
            .with_namespace(cfg.namespace.as_bytes())
    }

    pub fn with_policy(mut self, policy: EncodingPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<Vec<u8>>) -> Self {
        self.namespace = namespace.into();
        self
    }

    #[inline]
    pub fn policy(&self) -> EncodingPolicy {
        self.policy
    }

    #[inline]
    pub fn namespace(&self) -> &[u8] {
        &self.namespace
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    fn lock(&self) -> Result<MutexGuard<'_, Slot>, NodeIdError> {
        self.slot.lock().map_err(|_| NodeIdError::LockFailure)
    }

    /// Computes the identifier for `source`, reading the MAC for `Default`.
    fn compute(&self, source: &IdentitySource) -> Result<NodeId, NodeIdError> {
        match source {
            IdentitySource::Default => {
                let mac = self.provider.hardware_mac()?;
                encode(self.policy, &self.namespace, &self.policy.mac_identity(mac))
            },
            IdentitySource::Custom(bytes) => encode(self.policy, &self.namespace, bytes),
        }
    }

    // Caller holds the lock. Returns the snapshot now in the slot.
    fn init_locked(
        &self,
        slot: &mut Slot,
        source: &IdentitySource,
    ) -> Result<Arc<NodeId>, NodeIdError> {
        if let Some(id) = slot.as_ref() {
            return Ok(Arc::clone(id));
        }

        let id = Arc::new(self.compute(source)?);
        info!(node_id = %id, policy = %self.policy, ?source, "node id initialized");
        *slot = Some(Arc::clone(&id));
        Ok(id)
    }

    /// Computes and caches the identifier unless one is already cached.
    ///
    /// An initialized cache returns immediately without consulting `source`,
    /// so the MAC provider is read at most once per successful
    /// initialization. Otherwise an empty custom identity fails with
    /// [`NodeIdError::InvalidArgument`].
    pub fn ensure_initialized(&self, source: IdentitySource) -> Result<(), NodeIdError> {
        let mut slot = self.lock()?;
        if slot.is_some() {
            debug!("node id already initialized");
            return Ok(());
        }
        self.init_locked(&mut slot, &source).map(drop)
    }

    /// Recomputes the identifier from custom bytes and replaces the cached
    /// snapshot, whatever the current state.
    ///
    /// Fails with [`NodeIdError::InvalidArgument`] for `Default` or empty
    /// bytes. On any failure the previous snapshot stays in place.
    pub fn force_init(&self, source: IdentitySource) -> Result<(), NodeIdError> {
        let bytes = match source.custom_bytes() {
            Some(b) if !b.is_empty() => b,
            _ => {
                return Err(NodeIdError::InvalidArgument(
                    "force_init requires a non-empty custom identity",
                ));
            },
        };

        let mut slot = self.lock()?;
        warn!(
            "node_id force_init: replacing cached node id; previously returned handles keep the old value"
        );

        let id = encode(self.policy, &self.namespace, bytes)?;
        match slot.replace(Arc::new(id)) {
            Some(prev) if *prev != id => {
                warn!(previous = %prev, current = %id, "node id changed");
            },
            Some(_) => debug!(node_id = %id, "node id unchanged by force_init"),
            None => info!(node_id = %id, "node id initialized by force_init"),
        }
        Ok(())
    }

    /// Current identifier, initializing from the hardware MAC on first use.
    pub fn get(&self) -> Result<Arc<NodeId>, NodeIdError> {
        let mut slot = self.lock()?;
        self.init_locked(&mut slot, &IdentitySource::Default)
    }

    /// Current snapshot without triggering initialization.
    pub fn peek(&self) -> Result<Option<Arc<NodeId>>, NodeIdError> {
        Ok(self.lock()?.clone())
    }

    /// Whether a value is cached. A poisoned lock is reported as
    /// [`NodeIdError::LockFailure`], not as an empty cache.
    pub fn is_initialized(&self) -> Result<bool, NodeIdError> {
        Ok(self.lock()?.is_some())
    }
}

impl<P> fmt::Debug for IdentityCache<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("IdentityCache");
        s.field("policy", &self.policy)
            .field("namespace", &String::from_utf8_lossy(&self.namespace));
        // never block: the formatter may run while this thread holds the lock
        match self.slot.try_lock() {
            Ok(slot) => s.field("current", &slot.as_deref().copied()),
            Err(_) => s.field("current", &format_args!("<locked>")),
        };
        s.finish_non_exhaustive()
    }
}
