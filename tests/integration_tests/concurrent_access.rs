// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{
    collections::HashSet,
    sync::atomic::{AtomicUsize, Ordering},
    thread,
};

use node_id::{
    cache::{identity_cache::IdentityCache, mac::MacProvider},
    encoding::{EncodingPolicy, format_mac},
    models::{error::NodeIdError, node_id::NodeId, source::IdentitySource},
};

use super::common::{hashed, is_hashed_shape};

const MAC: [u8; 6] = [0x02, 0x00, 0x00, 0x00, 0x00, 0x01];

#[derive(Default)]
struct CountingMac(AtomicUsize);

impl MacProvider for CountingMac {
    fn hardware_mac(&self) -> Result<[u8; 6], NodeIdError> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(MAC)
    }
}

const READERS: usize = 8;
const WRITERS: usize = 4;
const ROUNDS: usize = 200;

#[test]
fn test_racing_first_use_initializes_once() {
    let cache = IdentityCache::new(CountingMac::default());

    let seen: Vec<NodeId> = thread::scope(|s| {
        let handles: Vec<_> = (0..READERS)
            .map(|_| s.spawn(|| *cache.get().expect("get")))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("reader panicked"))
            .collect()
    });

    let expected = hashed(format_mac(MAC).as_bytes());
    assert!(seen.iter().all(|id| *id == expected));
    assert_eq!(cache.provider().0.load(Ordering::SeqCst), 1);
}

#[test]
fn test_readers_never_see_torn_ids() {
    let cache = IdentityCache::new(CountingMac::default()).with_policy(EncodingPolicy::Hashed);
    let identities: Vec<Vec<u8>> = (0..WRITERS)
        .map(|w| format!("writer-{w}").into_bytes())
        .collect();

    let mut valid: HashSet<NodeId> = identities.iter().map(|i| hashed(i)).collect();
    valid.insert(hashed(format_mac(MAC).as_bytes()));

    let observed: Vec<NodeId> = thread::scope(|s| {
        for identity in &identities {
            let cache = &cache;
            s.spawn(move || {
                for _ in 0..ROUNDS {
                    cache
                        .force_init(IdentitySource::custom(identity.as_slice()))
                        .expect("force_init");
                }
            });
        }

        let readers: Vec<_> = (0..READERS)
            .map(|_| {
                s.spawn(|| {
                    (0..ROUNDS)
                        .map(|_| *cache.get().expect("get"))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        readers
            .into_iter()
            .flat_map(|h| h.join().expect("reader panicked"))
            .collect()
    });

    assert_eq!(observed.len(), READERS * ROUNDS);
    for id in &observed {
        assert!(is_hashed_shape(id.as_str()), "torn id {id}");
        assert!(valid.contains(id), "unexpected id {id}");
    }

    // last writer wins, whichever it was
    let last = cache.get().expect("get");
    assert!(identities.iter().any(|i| *last == hashed(i)));
}
