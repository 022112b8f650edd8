// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC Recolor - rule-based surface colour rewriting
//!
//! Selects elements of an IFC model with declarative rules over their type
//! and property sets, then repaints every surface style reachable from them.
//!
//! # Quick Start
//!
//! ```ignore
//! use ifc_recolor::{rules_from_json, RecolorEngine, RecolorOptions};
//!
//! let rules = rules_from_json(r##"[
//!     {"entity": "IfcWall",
//!      "conditions": [{"pset": "Finish", "key": "Material", "op": "equals", "value": "Plaster"}],
//!      "color": {"hex": "#FF0000"}}
//! ]"##)?;
//!
//! // Count first
//! let engine = RecolorEngine::new(RecolorOptions::default());
//! let preview = engine.dry_run(&model, &rules)?;
//! println!("{} styles on {} elements", preview.changed_styles, preview.touched_elements);
//!
//! // Then write
//! let stats = engine.run(&mut model, &rules)?;
//! ```
//!
//! # Components
//!
//! - [`color`] - `#RRGGBB` parsing and tolerance equality
//! - [`properties`] - property values of one element
//! - [`index`] - bounded property survey across element types
//! - [`rules`] / [`matcher`] - rule model, compilation and evaluation
//! - [`styles`] - surface styles reachable from an element
//! - [`interner`] - colour entity reuse
//! - [`engine`] - target selection, planning and applying

pub mod color;
pub mod engine;
pub mod error;
pub mod index;
pub mod interchange;
pub mod interner;
pub mod matcher;
pub mod properties;
pub mod rules;
pub mod styles;

#[cfg(test)]
mod test_utils;

pub use color::{ColorSpec, ColorSpecError, Rgb, COLOR_EPSILON};
pub use engine::{
    recolor, select_targets, RecolorEngine, RecolorOptions, RecolorPlan, RecolorStats, StyleWrite,
    DEFAULT_COLOR_TAG,
};
pub use error::{Error, Result};
pub use index::{
    build_index, discover_entity_types, pset_names, survey, IndexOptions, PropertyIndex,
    PropertyIndexer, SurveyRow, DEFAULT_ENTITY_TYPES,
};
pub use interchange::{rules_from_json, rules_to_json, strip_private};
pub use interner::{intern_color, ColorInterner, Interned};
pub use matcher::RuleMatcher;
pub use properties::{float_text, value_text, PropertyAccessor};
pub use rules::{
    compile_rules, is_wildcard_scope, CaseMode, CompiledRule, Condition, EntityScope, Op, Rule,
};
pub use styles::{StylePath, StyleRef, StyleResolver};

// Re-export the graph crate for convenience
pub use ifc_recolor_model;
