// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC Recolor Model - entity graph shared by the recolor engine
//!
//! This crate holds an already loaded IFC model as an arena of decoded
//! entities. Reading and writing IFC files is left to the caller; the engine
//! only needs the graph.
//!
//! # Architecture
//!
//! - [`Model`] - mutable in-memory arena of [`DecodedEntity`] values
//! - [`EntityResolver`] - read-only entity lookup, implemented by [`Model`]
//! - [`IfcType`] - classification with its supertype chain (`is_a`)
//! - [`Relations`] - inverse relationship edges built in one scan
//! - [`schema`] - attribute positions for the entities that get walked
//!
//! # Example
//!
//! ```ignore
//! use ifc_recolor_model::{AttributeValue, EntityResolver, IfcType, Model};
//!
//! let mut model = Model::new();
//! let wall = model.add(
//!     IfcType::IfcWallStandardCase,
//!     vec![AttributeValue::String("gid".into())],
//! )?;
//!
//! // Subtype-inclusive lookup
//! let walls = model.entities_by_type(&IfcType::IfcWall);
//! assert_eq!(walls[0].id, wall);
//! ```

pub mod error;
pub mod relations;
pub mod resolver;
pub mod schema;
pub mod store;
pub mod types;

pub use error::*;
pub use relations::*;
pub use resolver::*;
pub use store::*;
pub use types::*;
