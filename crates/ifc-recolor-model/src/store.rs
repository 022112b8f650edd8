// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory entity arena implementing [`EntityResolver`]

use crate::{
    AttributeValue, DecodedEntity, EntityId, EntityResolver, IfcType, ModelError, Result,
};
use rustc_hash::FxHashMap;

/// Mutable, fully resident IFC entity graph
///
/// Entities are stored by id with a per-exact-type index. Lookups by type are
/// subtype-inclusive and ordered by id, so traversals are deterministic.
///
/// Every mutation bumps [`Model::revision`], which lets callers key derived
/// data (such as a property index) on the content it was built from.
#[derive(Clone, Debug, Default)]
pub struct Model {
    /// Entity ID -> entity
    entities: FxHashMap<EntityId, DecodedEntity>,
    /// Exact type -> entity IDs (kept sorted)
    type_index: FxHashMap<IfcType, Vec<EntityId>>,
    /// Next id handed out by [`Model::add`]; may run one past `u32::MAX`
    next_id: u64,
    /// Mutation counter
    revision: u64,
}

impl Model {
    /// Create an empty model
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Self::default()
        }
    }

    /// Build a model from already decoded entities
    pub fn from_entities(entities: impl IntoIterator<Item = DecodedEntity>) -> Result<Self> {
        let mut model = Self::new();
        for entity in entities {
            model.insert(entity)?;
        }
        Ok(model)
    }

    /// Insert an entity under its own id
    pub fn insert(&mut self, entity: DecodedEntity) -> Result<EntityId> {
        let id = entity.id;
        if self.entities.contains_key(&id) {
            return Err(ModelError::DuplicateEntity(id));
        }

        let ids = self.type_index.entry(entity.ifc_type.clone()).or_default();
        let pos = ids.partition_point(|existing| *existing < id);
        ids.insert(pos, id);

        self.entities.insert(id, entity);
        self.next_id = self.next_id.max(u64::from(id.0) + 1);
        self.revision += 1;
        Ok(id)
    }

    /// Append a new entity with the next free id
    ///
    /// Ids continue after the highest id ever stored. Fails once that id is
    /// `u32::MAX`; existing entities are never replaced.
    pub fn add(
        &mut self,
        ifc_type: IfcType,
        attributes: Vec<AttributeValue>,
    ) -> Result<EntityId> {
        let raw =
            u32::try_from(self.next_id.max(1)).map_err(|_| ModelError::IdSpaceExhausted)?;
        let id = EntityId(raw);
        if self.entities.contains_key(&id) {
            return Err(ModelError::DuplicateEntity(id));
        }

        let entity = DecodedEntity::new(id, ifc_type, attributes);
        let ids = self.type_index.entry(entity.ifc_type.clone()).or_default();
        ids.push(id);
        self.entities.insert(id, entity);
        self.next_id = u64::from(raw) + 1;
        self.revision += 1;
        Ok(id)
    }

    /// Overwrite one attribute of an existing entity
    pub fn set_attribute(
        &mut self,
        id: EntityId,
        index: usize,
        value: AttributeValue,
    ) -> Result<()> {
        let entity = self
            .entities
            .get_mut(&id)
            .ok_or(ModelError::EntityNotFound(id))?;
        let len = entity.attributes.len();
        let slot = entity
            .attributes
            .get_mut(index)
            .ok_or_else(|| ModelError::attribute_out_of_range(id, index, len))?;
        *slot = value;
        self.revision += 1;
        Ok(())
    }

    /// Mutation counter; changes whenever the content changes
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of stored entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the model holds no entities
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterate all entities in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = &DecodedEntity> {
        self.all_ids()
            .into_iter()
            .filter_map(move |id| self.entities.get(&id))
    }
}

impl EntityResolver for Model {
    fn get(&self, id: EntityId) -> Option<&DecodedEntity> {
        self.entities.get(&id)
    }

    fn entities_by_type(&self, ifc_type: &IfcType) -> Vec<&DecodedEntity> {
        let mut ids: Vec<EntityId> = self
            .type_index
            .iter()
            .filter(|(ty, _)| ty.is_a(ifc_type))
            .flat_map(|(_, ids)| ids.iter().copied())
            .collect();
        ids.sort_unstable();
        ids.into_iter()
            .filter_map(|id| self.entities.get(&id))
            .collect()
    }

    fn count_by_type(&self, ifc_type: &IfcType) -> usize {
        self.type_index
            .iter()
            .filter(|(ty, _)| ty.is_a(ifc_type))
            .map(|(_, ids)| ids.len())
            .sum()
    }

    fn all_ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self.entities.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    fn entity_count(&self) -> usize {
        self.entities.len()
    }
}
