//! A loaded star system: immutable objects plus their hierarchy index

use std::sync::atomic::{AtomicU64, Ordering};

use crate::hierarchy::SystemHierarchy;
use crate::object::{CelestialObject, Classification, SystemDescription};

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// The complete system for one viewing session
#[derive(Debug, Clone)]
pub struct StarSystem {
    pub id: String,
    pub name: String,
    objects: Vec<CelestialObject>,
    hierarchy: SystemHierarchy,
    primary_star: Option<usize>,
    generation: u64,
}

impl StarSystem {
    pub fn new(description: SystemDescription) -> Self {
        let SystemDescription {
            id,
            name,
            objects,
            lighting,
        } = description;
        let hierarchy = SystemHierarchy::build(&objects);
        for object in objects.iter().filter(|o| o.classification == Classification::Other) {
            log::warn!(
                "'{}' has an unrecognised classification, scaling it as a plain body",
                object.id
            );
        }

        let is_star = |i: &usize| objects[*i].classification == Classification::Star;
        let requested = lighting
            .primary_star
            .as_deref()
            .and_then(|star| hierarchy.index_of(star))
            .filter(is_star);
        if requested.is_none() {
            if let Some(star) = &lighting.primary_star {
                log::warn!("primary star '{star}' not found in '{id}', picking one");
            }
        }
        let primary_star = requested
            .or_else(|| hierarchy.depth_first().iter().copied().find(is_star));

        let generation = NEXT_GENERATION.fetch_add(1, Ordering::Relaxed);
        log::debug!(
            "loaded system '{}' with {} objects (generation {})",
            id,
            objects.len(),
            generation
        );

        Self {
            id,
            name,
            objects,
            hierarchy,
            primary_star,
            generation,
        }
    }

    pub fn from_objects(id: &str, objects: Vec<CelestialObject>) -> Self {
        Self::new(SystemDescription {
            id: id.to_string(),
            name: id.to_string(),
            objects,
            lighting: Default::default(),
        })
    }

    /// Process-unique identity of this object set, used as the layout cache key
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn objects(&self) -> &[CelestialObject] {
        &self.objects
    }

    pub fn hierarchy(&self) -> &SystemHierarchy {
        &self.hierarchy
    }

    pub fn get(&self, id: &str) -> Option<&CelestialObject> {
        self.hierarchy.index_of(id).map(|i| &self.objects[i])
    }

    pub fn primary_star(&self) -> Option<&CelestialObject> {
        self.primary_star.map(|i| &self.objects[i])
    }

    pub fn parent_of(&self, id: &str) -> Option<&CelestialObject> {
        let node = self.hierarchy.index_of(id)?;
        self.hierarchy.parent(node).map(|p| &self.objects[p])
    }

    pub fn children_of(&self, id: &str) -> impl Iterator<Item = &CelestialObject> + '_ {
        let children = self
            .hierarchy
            .index_of(id)
            .map(|node| self.hierarchy.children(node))
            .unwrap_or(&[]);
        children.iter().map(move |&c| &self.objects[c])
    }
}
