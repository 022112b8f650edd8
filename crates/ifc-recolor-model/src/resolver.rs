// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity resolution trait for looking up and resolving IFC entities

use crate::{AttributeValue, DecodedEntity, EntityId, IfcType};

/// Entity lookup and reference resolution
///
/// This trait provides read access to the entity graph. Everything that only
/// inspects the model (property access, rule matching, style resolution)
/// goes through it, so those parts never need a mutable borrow.
///
/// # Example
///
/// ```ignore
/// use ifc_recolor_model::{EntityResolver, IfcType, schema};
///
/// fn count_styled(resolver: &dyn EntityResolver) -> usize {
///     resolver
///         .entities_by_type(&IfcType::IfcProduct)
///         .iter()
///         .filter(|p| p.get_ref(schema::product::REPRESENTATION).is_some())
///         .count()
/// }
/// ```
pub trait EntityResolver: Send + Sync {
    /// Get entity by ID
    fn get(&self, id: EntityId) -> Option<&DecodedEntity>;

    /// Resolve an entity reference from an attribute value
    fn resolve_ref(&self, attr: &AttributeValue) -> Option<&DecodedEntity> {
        match attr {
            AttributeValue::EntityRef(id) => self.get(*id),
            _ => None,
        }
    }

    /// Resolve a list of entity references
    ///
    /// A single reference resolves to one entity; unresolvable entries are
    /// skipped.
    fn resolve_ref_list(&self, attr: &AttributeValue) -> Vec<&DecodedEntity> {
        attr.entity_refs()
            .into_iter()
            .filter_map(|id| self.get(id))
            .collect()
    }

    /// Get all entities that are instances of `ifc_type` or of a subtype
    ///
    /// Results are ordered by ascending entity id. A type with no instances
    /// yields an empty vector.
    fn entities_by_type(&self, ifc_type: &IfcType) -> Vec<&DecodedEntity>;

    /// Find entities by type name string (case-insensitive, subtype-inclusive)
    fn find_by_type_name(&self, type_name: &str) -> Vec<&DecodedEntity> {
        self.entities_by_type(&IfcType::parse(type_name))
    }

    /// Count instances of `ifc_type` including subtypes
    fn count_by_type(&self, ifc_type: &IfcType) -> usize {
        self.entities_by_type(ifc_type).len()
    }

    /// Get all entity IDs in the model, ascending
    fn all_ids(&self) -> Vec<EntityId>;

    /// Get total entity count
    fn entity_count(&self) -> usize {
        self.all_ids().len()
    }
}

/// Extension methods for EntityResolver
pub trait EntityResolverExt: EntityResolver {
    /// Check if an entity exists
    fn exists(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Get entity or return error
    fn get_or_err(&self, id: EntityId) -> crate::Result<&DecodedEntity> {
        self.get(id).ok_or(crate::ModelError::EntityNotFound(id))
    }

    /// Resolve the reference held at `index` of `entity`
    fn follow(&self, entity: &DecodedEntity, index: usize) -> Option<&DecodedEntity> {
        entity.get_ref(index).and_then(|id| self.get(id))
    }

    /// Resolve every reference held at `index` of `entity`
    fn follow_all(&self, entity: &DecodedEntity, index: usize) -> Vec<&DecodedEntity> {
        entity
            .get_refs(index)
            .into_iter()
            .filter_map(|id| self.get(id))
            .collect()
    }
}

// Blanket implementation for all EntityResolver types
impl<T: EntityResolver + ?Sized> EntityResolverExt for T {}
