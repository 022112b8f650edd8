// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Inverse relationship index
//!
//! IFC stores most links on the relationship side (`IfcRelDefinesByProperties`
//! points at the element, not the other way round). Walking from an element to
//! its property sets, type objects, materials or styles therefore needs the
//! inverse edges. They are collected here in a single scan of the model.

use crate::schema;
use crate::{EntityId, EntityResolver, IfcType};
use rustc_hash::FxHashMap;

/// Inverse edges of one model snapshot
///
/// Edge lists keep the order of the relationship entities (ascending id).
#[derive(Clone, Debug, Default)]
pub struct Relations {
    /// Element -> property definitions (IsDefinedBy)
    defined_by: FxHashMap<EntityId, Vec<EntityId>>,
    /// Element -> type objects (IsTypedBy)
    typed_by: FxHashMap<EntityId, Vec<EntityId>>,
    /// Object -> relating materials (HasAssociations, material only)
    materials: FxHashMap<EntityId, Vec<EntityId>>,
    /// Representation item -> styled items (StyledByItem)
    styled_by_item: FxHashMap<EntityId, Vec<EntityId>>,
    /// Material -> material definition representations (HasRepresentation)
    has_representation: FxHashMap<EntityId, Vec<EntityId>>,
}

impl Relations {
    /// Build the inverse index from every relationship in the model
    pub fn build(resolver: &dyn EntityResolver) -> Self {
        let mut relations = Relations::default();

        for rel in resolver.entities_by_type(&IfcType::IfcRelDefinesByProperties) {
            if let Some(pset) = rel.get_ref(schema::relationship::RELATING) {
                for object in related_objects(rel) {
                    relations.defined_by.entry(object).or_default().push(pset);
                }
            }
        }

        for rel in resolver.entities_by_type(&IfcType::IfcRelDefinesByType) {
            if let Some(ty) = rel.get_ref(schema::relationship::RELATING) {
                for object in related_objects(rel) {
                    relations.typed_by.entry(object).or_default().push(ty);
                }
            }
        }

        for rel in resolver.entities_by_type(&IfcType::IfcRelAssociatesMaterial) {
            if let Some(material) = rel.get_ref(schema::relationship::RELATING) {
                for object in related_objects(rel) {
                    relations.materials.entry(object).or_default().push(material);
                }
            }
        }

        for styled in resolver.entities_by_type(&IfcType::IfcStyledItem) {
            if let Some(item) = styled.get_ref(schema::styled_item::ITEM) {
                relations
                    .styled_by_item
                    .entry(item)
                    .or_default()
                    .push(styled.id);
            }
        }

        for rep in resolver.entities_by_type(&IfcType::IfcMaterialDefinitionRepresentation) {
            if let Some(material) =
                rep.get_ref(schema::material_representation::REPRESENTED_MATERIAL)
            {
                relations
                    .has_representation
                    .entry(material)
                    .or_default()
                    .push(rep.id);
            }
        }

        log::debug!(
            "Indexed relations: {} defined, {} typed, {} with materials, {} styled items, \
             {} material representations",
            relations.defined_by.len(),
            relations.typed_by.len(),
            relations.materials.len(),
            relations.styled_by_item.len(),
            relations.has_representation.len(),
        );

        relations
    }

    /// Property definitions attached to `object`
    pub fn defined_by(&self, object: EntityId) -> &[EntityId] {
        slice(&self.defined_by, object)
    }

    /// Type objects assigned to `object`
    pub fn typed_by(&self, object: EntityId) -> &[EntityId] {
        slice(&self.typed_by, object)
    }

    /// Materials associated with `object`, one entry per association
    pub fn materials(&self, object: EntityId) -> &[EntityId] {
        slice(&self.materials, object)
    }

    /// Styled items that point at representation item `item`
    pub fn styled_by_item(&self, item: EntityId) -> &[EntityId] {
        slice(&self.styled_by_item, item)
    }

    /// Material definition representations of `material`
    pub fn has_representation(&self, material: EntityId) -> &[EntityId] {
        slice(&self.has_representation, material)
    }
}

fn slice(map: &FxHashMap<EntityId, Vec<EntityId>>, key: EntityId) -> &[EntityId] {
    map.get(&key).map(Vec::as_slice).unwrap_or(&[])
}

/// RelatedObjects of a relationship, each object listed once
fn related_objects(rel: &crate::DecodedEntity) -> Vec<EntityId> {
    let mut objects = rel.get_refs(schema::relationship::RELATED_OBJECTS);
    let mut seen = rustc_hash::FxHashSet::default();
    objects.retain(|id| seen.insert(*id));
    objects
}
