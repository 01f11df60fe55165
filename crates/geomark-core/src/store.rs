//! Vector store owning completed annotation features.

use crate::types::{Feature, FeatureId, Geometry};

/// Owns the set of annotation features the user has drawn.
///
/// Features live from the completing gesture until they are removed or
/// the store is cleared; nothing is persisted across runs.
#[derive(Debug, Default, Clone)]
pub struct VectorStore {
    features: Vec<Feature>,
}

impl VectorStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a completed geometry and returns the id of the new feature.
    pub fn add(&mut self, geometry: Geometry) -> FeatureId {
        let feature = Feature::new(geometry);
        let id = feature.id;
        self.features.push(feature);
        id
    }

    /// All features, in creation order.
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Looks up a feature by id.
    pub fn get(&self, id: FeatureId) -> Option<&Feature> {
        self.features.iter().find(|f| f.id == id)
    }

    /// Removes a feature by id, returning it if present.
    pub fn remove(&mut self, id: FeatureId) -> Option<Feature> {
        let idx = self.features.iter().position(|f| f.id == id)?;
        Some(self.features.remove(idx))
    }

    /// Number of features in the store.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns true if the store holds no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Discards all features.
    pub fn clear(&mut self) {
        self.features.clear();
    }
}
