use std::collections::HashMap;

use crate::campus::{Location, LocationId};
use crate::error::{Error, Result};

/// Bidirectional mapping between location identifiers and the dense
/// `0..n` indices used by the path matrices.
///
/// Indices follow the order in which locations were supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationIndex {
    ids: Vec<LocationId>,
    positions: HashMap<LocationId, usize>,
}

impl LocationIndex {
    /// Build the mapping for a location set, rejecting repeated identifiers.
    pub fn build(locations: &[Location]) -> Result<Self> {
        let mut ids = Vec::with_capacity(locations.len());
        let mut positions = HashMap::with_capacity(locations.len());
        for location in locations {
            if positions.insert(location.id, ids.len()).is_some() {
                return Err(Error::DuplicateLocation { id: location.id });
            }
            ids.push(location.id);
        }
        Ok(Self { ids, positions })
    }

    /// Dense index for an identifier.
    pub fn index_of(&self, id: LocationId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// Identifier stored at a dense index.
    pub fn id_at(&self, index: usize) -> Option<LocationId> {
        self.ids.get(index).copied()
    }

    pub fn contains(&self, id: LocationId) -> bool {
        self.positions.contains_key(&id)
    }

    /// Identifiers in index order.
    pub fn ids(&self) -> &[LocationId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
