//! Shared helpers for vocab-core integration tests

#![allow(dead_code)]

use tracing_subscriber::EnvFilter;
use vocab_core::IndexStore;

/// Install a test-friendly subscriber once per test binary
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vocab_core=debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Build a `String` store by interning `terms` in order
pub fn term_store(terms: &[&str]) -> IndexStore<String> {
    let mut store = IndexStore::new();
    for term in terms {
        store.get_index(*term);
    }
    store
}

/// Assert both mappings agree and indices are exactly `0..count()`
pub fn assert_dense_bijection(store: &IndexStore<String>) {
    for (index, value) in store.items() {
        assert_eq!(store.index_of(value.as_str()), Some(index), "reverse mapping for {value}");
        assert_eq!(store.get_value(index).ok(), Some(value));
    }
    assert_eq!(store.items().count(), store.count());
    assert_eq!(store.values().len(), store.count());
    assert!(!store.has_index(store.count()));
}
