//! Memoized layouts
//!
//! Keyed by system generation and view-mode id. A system gets a fresh
//! generation whenever it is built, so layouts of a replaced system are never
//! handed out for its successor even before the host calls `invalidate`.

use std::collections::HashMap;
use std::sync::Arc;

use crate::mechanics::{compute_layout, SystemLayout};
use crate::system::StarSystem;
use crate::view_mode::{ScalingConfig, ViewModeDefinition};

#[derive(Debug, Clone)]
struct CachedLayout {
    scaling: ScalingConfig,
    layout: Arc<SystemLayout>,
}

#[derive(Debug, Default)]
pub struct LayoutCache {
    entries: HashMap<(u64, String), CachedLayout>,
    hits: u64,
    misses: u64,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layout of `system` under `mode`, computing it on first use
    pub fn get_or_compute(&mut self, system: &StarSystem, mode: &ViewModeDefinition) -> Arc<SystemLayout> {
        let key = (system.generation(), mode.id.clone());
        if let Some(cached) = self.entries.get(&key) {
            // A live-reloaded mode keeps its id but may change its numbers
            if cached.scaling == mode.scaling {
                self.hits += 1;
                return Arc::clone(&cached.layout);
            }
            log::debug!("scaling for '{}' changed, recomputing layout", mode.id);
        }

        self.misses += 1;
        let layout = Arc::new(compute_layout(system, mode));
        log::debug!(
            "computed layout for '{}' in {} mode ({} objects)",
            system.id,
            mode.id,
            layout.results().len()
        );
        self.entries.insert(
            key,
            CachedLayout {
                scaling: mode.scaling.clone(),
                layout: Arc::clone(&layout),
            },
        );
        layout
    }

    /// Drop everything, e.g. on a system switch
    pub fn invalidate(&mut self) {
        self.entries.clear();
    }

    /// Drop the layouts of one system
    pub fn invalidate_system(&mut self, generation: u64) {
        self.entries.retain(|(cached, _), _| *cached != generation);
    }

    /// Drop the layouts computed for one view mode
    pub fn invalidate_mode(&mut self, mode_id: &str) {
        self.entries.retain(|(_, cached), _| cached != mode_id);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (hits, misses) since construction
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}
