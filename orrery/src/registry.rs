//! View-mode registry
//!
//! Constructed explicitly and handed to whoever needs it. Built-in modes are
//! registered synchronously by [`ViewModeRegistry::with_builtin_modes`].

use std::collections::HashMap;

use crate::error::ViewModeError;
use crate::view_mode::{canonical_id, ViewModeCategory, ViewModeDefinition};

/// What happens when an id is registered twice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RegistrationPolicy {
    /// Collisions are rejected unless `register_or_replace` is used
    #[default]
    Strict,
    /// Development sessions that reload mode files replace silently
    LiveReload,
}

#[derive(Debug, Clone)]
pub struct ViewModeRegistry {
    modes: Vec<ViewModeDefinition>,
    index: HashMap<String, usize>,
    policy: RegistrationPolicy,
    fallback: ViewModeDefinition,
}

impl Default for ViewModeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewModeRegistry {
    /// Empty registry; lookups still answer with the explorational fallback
    pub fn new() -> Self {
        Self {
            modes: Vec::new(),
            index: HashMap::new(),
            policy: RegistrationPolicy::Strict,
            fallback: ViewModeDefinition::explorational(),
        }
    }

    pub fn with_builtin_modes() -> Self {
        let mut registry = Self::new();
        for mode in ViewModeDefinition::builtin() {
            // Built-ins are valid and distinct
            if let Err(err) = registry.register(mode) {
                log::error!("built-in view mode rejected: {err}");
            }
        }
        registry
    }

    pub fn set_policy(&mut self, policy: RegistrationPolicy) {
        self.policy = policy;
    }

    pub fn policy(&self) -> RegistrationPolicy {
        self.policy
    }

    /// Add a mode; an existing id is an error unless the policy is live reload
    pub fn register(&mut self, mode: ViewModeDefinition) -> Result<(), ViewModeError> {
        mode.validate()?;
        let mode = canonicalized(mode);
        if self.index.contains_key(&mode.id) && self.policy == RegistrationPolicy::Strict {
            return Err(ViewModeError::DuplicateId(mode.id));
        }
        self.insert(mode);
        Ok(())
    }

    /// Add a mode, replacing any existing one with the same id
    pub fn register_or_replace(&mut self, mode: ViewModeDefinition) -> Result<(), ViewModeError> {
        mode.validate()?;
        self.insert(canonicalized(mode));
        Ok(())
    }

    fn insert(&mut self, mode: ViewModeDefinition) {
        match self.index.get(&mode.id) {
            Some(&slot) => {
                log::debug!("replacing view mode '{}'", mode.id);
                self.modes[slot] = mode;
            }
            None => {
                log::debug!("registered view mode '{}'", mode.id);
                self.index.insert(mode.id.clone(), self.modes.len());
                self.modes.push(mode);
            }
        }
    }

    pub fn unregister(&mut self, id: &str) -> Option<ViewModeDefinition> {
        let slot = self.index.remove(canonical_id(id))?;
        let removed = self.modes.remove(slot);
        for position in self.index.values_mut() {
            if *position > slot {
                *position -= 1;
            }
        }
        Some(removed)
    }

    pub fn get(&self, id: &str) -> Option<&ViewModeDefinition> {
        self.index
            .get(canonical_id(id))
            .map(|&slot| &self.modes[slot])
    }

    /// Look a mode up, answering a miss with the explorational defaults
    pub fn get_or_default(&self, id: &str) -> &ViewModeDefinition {
        match self.get(id) {
            Some(mode) => mode,
            None => {
                log::warn!("unknown view mode '{id}', falling back to explorational");
                self.get(crate::view_mode::EXPLORATIONAL)
                    .unwrap_or(&self.fallback)
            }
        }
    }

    pub fn has(&self, id: &str) -> bool {
        self.index.contains_key(canonical_id(id))
    }

    /// Every mode in registration order
    pub fn all(&self) -> &[ViewModeDefinition] {
        &self.modes
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.modes.iter().map(|mode| mode.id.as_str())
    }

    pub fn by_category(&self, category: ViewModeCategory) -> Vec<&ViewModeDefinition> {
        self.modes
            .iter()
            .filter(|mode| mode.category == category)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }
}

/// Aliases register under the id they resolve to
fn canonicalized(mut mode: ViewModeDefinition) -> ViewModeDefinition {
    let canonical = canonical_id(&mode.id);
    if canonical != mode.id {
        log::debug!("view mode id '{}' is an alias of '{canonical}'", mode.id);
        mode.id = canonical.to_string();
    }
    mode
}
