//! Process-wide model cache.
//!
//! Populated on first build, never invalidated before process exit. The
//! write lock makes concurrent first registration of a name cache at most
//! one `Arc<Model>`.

use super::Model;

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

fn registry() -> &'static RwLock<HashMap<String, Arc<Model>>> {
    static REGISTRY: OnceLock<RwLock<HashMap<String, Arc<Model>>>> = OnceLock::new();
    REGISTRY.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Registers a freshly built model, or returns the already cached one for
/// the same name.
pub(crate) fn register(model: Model) -> Arc<Model> {
    let mut models = registry().write().unwrap();
    models
        .entry(model.name.clone())
        .or_insert_with(|| Arc::new(model))
        .clone()
}

/// Looks up a registered model by name.
pub fn lookup(name: &str) -> Option<Arc<Model>> {
    registry().read().unwrap().get(name).cloned()
}
