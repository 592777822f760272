use std::sync::{Arc, Mutex};
use store::memory::MemoryStore;

/// Shared application state.
///
/// The scheduling core assumes at most one in-flight mutation per schedule;
/// the mutex serializes every store access, which satisfies that without
/// per-schedule bookkeeping.
#[derive(Clone, Default)]
pub struct AppState {
    pub store: Arc<Mutex<MemoryStore>>,
}
