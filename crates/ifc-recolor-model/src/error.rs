// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for model access and mutation

use crate::EntityId;
use thiserror::Error;

/// Result type alias for model operations
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors that can occur while reading or writing the entity graph
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Entity not found
    #[error("Entity {0} not found")]
    EntityNotFound(EntityId),

    /// An entity with this id already exists
    #[error("Entity {0} already exists")]
    DuplicateEntity(EntityId),

    /// Every entity id up to `u32::MAX` has been handed out
    #[error("No free entity id left after #{}", u32::MAX)]
    IdSpaceExhausted,

    /// Attribute index past the end of the entity's attribute list
    #[error("Entity {entity} has {len} attributes, cannot access attribute {attribute}")]
    AttributeOutOfRange {
        entity: EntityId,
        attribute: usize,
        len: usize,
    },
}

impl ModelError {
    /// Create an attribute out of range error
    pub fn attribute_out_of_range(entity: EntityId, attribute: usize, len: usize) -> Self {
        ModelError::AttributeOutOfRange {
            entity,
            attribute,
            len,
        }
    }
}
