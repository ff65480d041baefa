//! Resource Set - the registry built by the load phase
//!
//! Maps resource ids to their specs. Setup and the renderer look resources
//! up by id. The set is read-only once loading is done.

use std::collections::HashMap;

use super::manifest::{FrameSize, ResourceSpec};
use crate::error::{GameError, Result};

#[derive(Debug, Default)]
pub struct ResourceSet {
    /// Specs keyed by id
    resources: HashMap<String, ResourceSpec>,
    /// Ids in registration order (for iteration order)
    order: Vec<String>,
}

impl ResourceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one resource. Ids must be unique.
    pub fn register(&mut self, spec: ResourceSpec) -> Result<()> {
        if self.resources.contains_key(&spec.id) {
            return Err(GameError::DuplicateResource(spec.id));
        }
        log::debug!("Registered resource '{}' -> {}", spec.id, spec.path);
        self.order.push(spec.id.clone());
        self.resources.insert(spec.id.clone(), spec);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&ResourceSpec> {
        self.resources.get(id)
    }

    /// Look up a resource, failing setup if it was never registered
    pub fn require(&self, id: &str) -> Result<&ResourceSpec> {
        self.get(id).ok_or_else(|| GameError::MissingResource(id.to_string()))
    }

    /// Look up a sprite sheet's frame size
    pub fn require_sheet(&self, id: &str) -> Result<FrameSize> {
        self.require(id)?
            .frame
            .ok_or_else(|| GameError::NotASpriteSheet(id.to_string()))
    }

    /// Iterate specs in registration order
    pub fn iter(&self) -> impl Iterator<Item = &ResourceSpec> {
        self.order.iter().filter_map(|id| self.resources.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }
}

/// Load phase: register every resource in the manifest
pub fn load(manifest: &[ResourceSpec]) -> Result<ResourceSet> {
    let mut set = ResourceSet::new();
    for spec in manifest {
        set.register(spec.clone())?;
    }
    log::info!("Registered {} resources", set.len());
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::default_manifest;

    #[test]
    fn test_load_default_manifest() {
        let set = load(&default_manifest()).unwrap();
        assert_eq!(set.len(), 15);
        assert!(set.get("enemy_dead").is_some());
        assert_eq!(set.require_sheet("player_walk").unwrap(), FrameSize::new(32, 48));

        // Registration order survives
        let first: Vec<_> = set.iter().take(2).map(|r| r.id.as_str()).collect();
        assert_eq!(first, vec!["sky", "ground"]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let manifest = vec![
            ResourceSpec::image("sky", "a.png"),
            ResourceSpec::image("sky", "b.png"),
        ];
        let err = load(&manifest).unwrap_err();
        assert!(matches!(err, GameError::DuplicateResource(id) if id == "sky"));
    }

    #[test]
    fn test_require_errors() {
        let set = load(&[ResourceSpec::image("ground", "g.png")]).unwrap();
        assert!(matches!(set.require("nope"), Err(GameError::MissingResource(_))));
        assert!(matches!(set.require_sheet("ground"), Err(GameError::NotASpriteSheet(_))));
    }
}
