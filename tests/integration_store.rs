// envstore: Validated Environment Variable Store
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the variable store.
//!
//! Exercises the public store API against in-memory origin tables.

use envstore::error::{EnvError, NameViolation, ValueViolation};
use envstore::store::origin::text_table;
use envstore::store::{
    Admission, ContextTable, EmptyValues, Origins, SharedStore, StoreOptions, VariableStore,
    live_store,
};

fn store_over(env: &ContextTable, ctx: &ContextTable) -> VariableStore {
    VariableStore::builder()
        .primary_table(Box::new(env.clone()))
        .secondary_table(Box::new(ctx.clone()))
        .build()
        .unwrap()
}

fn seeded() -> (VariableStore, ContextTable, ContextTable) {
    let env = ContextTable::from_entries([("HOME", "/home/user"), ("LANG", "C")]);
    let ctx = ContextTable::from_entries([("SERVER_NAME", "localhost")]);
    (store_over(&env, &ctx), env, ctx)
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn store_secondary_only_snapshot() {
    let store = VariableStore::builder()
        .primary_table(Box::new(ContextTable::named("environment")))
        .primary(Vec::new())
        .secondary(text_table([("K", "V")]))
        .build()
        .unwrap();

    assert_eq!(store.count(), 1);
    assert_eq!(store.get("K").unwrap(), "V");
}

#[test]
fn store_collision_secondary_wins() {
    let store = VariableStore::builder()
        .primary_table(Box::new(ContextTable::named("environment")))
        .primary(text_table([("K", "A")]))
        .secondary(text_table([("K", "B")]))
        .build()
        .unwrap();

    assert_eq!(store.get("K").unwrap(), "B");
    assert_eq!(store.get_in("K", Origins::PRIMARY), Some("A"));
    assert_eq!(store.origins("K"), Some(Origins::all()));
}

#[test]
fn store_both_empty_is_unavailable() {
    let err = VariableStore::builder()
        .primary_table(Box::new(ContextTable::named("environment")))
        .primary(Vec::new())
        .secondary(Vec::new())
        .build()
        .unwrap_err();

    assert!(matches!(err, EnvError::EnvironmentUnavailable { .. }));
}

#[test]
fn store_both_empty_allowed_by_option() {
    let store = VariableStore::builder()
        .primary_table(Box::new(ContextTable::named("environment")))
        .primary(Vec::new())
        .secondary(Vec::new())
        .options(StoreOptions::builder().with_allow_empty_primary(true).build())
        .build()
        .unwrap();

    assert!(store.is_empty());
}

#[test]
fn store_drop_invalid_admission() {
    let store = VariableStore::builder()
        .primary_table(Box::new(ContextTable::named("environment")))
        .primary(text_table([("GOOD", "v"), (" PADDED", "v"), ("SPACEY", " v")]))
        .options(
            StoreOptions::builder()
                .with_admission(Admission::DropInvalid)
                .build(),
        )
        .build()
        .unwrap();

    assert_eq!(store.to_map().into_keys().collect::<Vec<_>>(), ["GOOD"]);
}

#[test]
fn store_over_live_process_environment() {
    let store = live_store(ContextTable::new(), StoreOptions::default()).unwrap();

    for (name, value) in std::env::vars_os() {
        if let (Some(name), Some(value)) = (name.to_str(), value.to_str()) {
            assert_eq!(store.get(name).unwrap(), value);
        }
    }
}

// =============================================================================
// Queries
// =============================================================================

#[test]
fn store_missing_name() {
    let (store, _, _) = seeded();

    assert!(matches!(
        store.get("NEVER_SET"),
        Err(EnvError::NotFound { ref name }) if name == "NEVER_SET"
    ));
    assert_eq!(store.get_or("NEVER_SET", "fallback"), "fallback");
    assert!(!store.has("NEVER_SET"));
}

#[test]
fn store_to_map_is_stable_and_detached() {
    let (store, _, _) = seeded();

    let first = store.to_map();
    let mut second = store.to_map();
    assert_eq!(first, second);

    second.insert("INJECTED".to_string(), "x".to_string());
    second.remove("HOME");
    assert!(!store.has("INJECTED"));
    assert!(store.has("HOME"));
    assert_eq!(store.to_map(), first);
}

#[test]
fn store_iterates_in_name_order() {
    let (store, _, _) = seeded();
    let names: Vec<&str> = store.iter().map(|(name, _)| name).collect();
    assert_eq!(names, ["HOME", "LANG", "SERVER_NAME"]);
}

#[test]
fn store_snapshot_ignores_later_mutation() {
    let (mut store, _, _) = seeded();
    let snapshot = store.snapshot();

    store.set("NEW", "1").unwrap();
    store.unset("HOME").unwrap();

    assert_eq!(snapshot.len(), 3);
    assert_eq!(snapshot.get("HOME"), Some("/home/user"));
    assert_eq!(snapshot.get("NEW"), None);
    assert_eq!(snapshot.iter().count(), snapshot.iter().count());
}

// =============================================================================
// Mutation
// =============================================================================

#[test]
fn store_set_then_get() {
    let (mut store, env, ctx) = seeded();
    let pairs = [
        ("PATH", "/usr/bin:/bin"),
        ("EMPTY", ""),
        ("INNER SPACE", "a b"),
        ("UNICODE_\u{e9}", "caf\u{e9}"),
        ("HOME", "/root"),
    ];

    for (name, value) in pairs {
        store.set(name, value).unwrap();
        assert_eq!(store.get(name).unwrap(), value);
        assert!(store.has(name));
        assert_eq!(env.get(name).as_deref(), Some(value));
        assert_eq!(ctx.get(name).as_deref(), Some(value));
    }
}

#[test]
fn store_set_unset_restores_count() {
    let (mut store, env, ctx) = seeded();
    let before = store.count();

    store.set("TEMP", "1").unwrap();
    assert_eq!(store.count(), before + 1);

    store.unset("TEMP").unwrap();
    assert_eq!(store.count(), before);
    assert!(!store.has("TEMP"));
    assert!(!env.contains("TEMP"));
    assert!(!ctx.contains("TEMP"));
}

#[test]
fn store_per_origin_mutation() {
    let (mut store, env, ctx) = seeded();

    store.set_in("SERVER_NAME", "example.org", Origins::PRIMARY).unwrap();
    assert_eq!(store.get("SERVER_NAME").unwrap(), "localhost");
    assert_eq!(store.get_in("SERVER_NAME", Origins::PRIMARY), Some("example.org"));
    assert_eq!(env.get("SERVER_NAME").as_deref(), Some("example.org"));

    store.unset_in("SERVER_NAME", Origins::SECONDARY).unwrap();
    assert_eq!(store.get("SERVER_NAME").unwrap(), "example.org");
    assert_eq!(store.origins("SERVER_NAME"), Some(Origins::PRIMARY));
    assert!(!ctx.contains("SERVER_NAME"));

    assert!(!store.has_in("LANG", Origins::SECONDARY));
    assert_eq!(store.get_in_or("LANG", Origins::SECONDARY, "unset"), "unset");
    assert!(matches!(
        store.unset_in("LANG", Origins::SECONDARY),
        Err(EnvError::NotFound { .. })
    ));
    assert_eq!(store.count(), 3);
}

#[test]
fn store_unset_absent_is_not_found() {
    let (mut store, _, _) = seeded();
    let before = store.count();

    assert!(matches!(
        store.unset("NEVER_SET"),
        Err(EnvError::NotFound { .. })
    ));
    assert_eq!(store.count(), before);
}

#[test]
fn store_rejects_invalid_pairs() {
    let (mut store, _, _) = seeded();
    let before = store.to_map();

    assert!(matches!(
        store.set("", "v"),
        Err(EnvError::InvalidName {
            violation: NameViolation::Empty,
            ..
        })
    ));
    assert!(matches!(
        store.set("A=B", "v"),
        Err(EnvError::InvalidName {
            violation: NameViolation::ContainsEquals,
            ..
        })
    ));
    assert!(matches!(
        store.set("k", " v"),
        Err(EnvError::InvalidValue {
            violation: ValueViolation::Untrimmed,
            ..
        })
    ));
    assert!(matches!(
        store.set("k", "v\0v"),
        Err(EnvError::InvalidValue {
            violation: ValueViolation::ContainsNul,
            ..
        })
    ));

    assert_eq!(store.to_map(), before);
}

#[test]
fn store_reject_empty_values_policy() {
    let env = ContextTable::from_entries([("HOME", "/home/user")]);
    let mut store = VariableStore::builder()
        .primary_table(Box::new(env))
        .options(
            StoreOptions::builder()
                .with_empty_values(EmptyValues::Reject)
                .build(),
        )
        .build()
        .unwrap();

    assert!(matches!(
        store.set("K", ""),
        Err(EnvError::InvalidValue {
            violation: ValueViolation::Empty,
            ..
        })
    ));
    assert!(!store.has("K"));
}

// =============================================================================
// Sharing
// =============================================================================

#[test]
fn shared_store_across_threads() {
    let (store, _, ctx) = seeded();
    let shared = SharedStore::from(store);

    std::thread::scope(|scope| {
        for i in 0..4 {
            let shared = shared.clone();
            scope.spawn(move || {
                shared.set(&format!("WORKER_{i}"), &i.to_string()).unwrap();
            });
        }
    });

    assert_eq!(shared.count(), 7);
    assert_eq!(shared.get("WORKER_2").unwrap(), "2");
    assert_eq!(ctx.get("WORKER_3").as_deref(), Some("3"));
}
