// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Property survey across element types
//!
//! The index answers "which property sets, keys and values exist on walls?"
//! without touching the model again. It is bounded: at most
//! `max_elements_per_type` elements are visited per requested type and at
//! most `max_values_per_key` distinct values are kept per key. Both limits
//! drop the excess silently.

use crate::properties::{pset_name, single_values, value_text, PropertyAccessor};
use crate::rules::is_wildcard_scope;
use ifc_recolor_model::{EntityResolver, IfcType, Model, Relations};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Types surveyed when no explicit list is given
pub const DEFAULT_ENTITY_TYPES: [&str; 18] = [
    "IfcGeographicElement",
    "IfcProduct",
    "IfcBuildingElementProxy",
    "IfcSite",
    "IfcBuilding",
    "IfcBuildingStorey",
    "IfcSpace",
    "IfcWall",
    "IfcSlab",
    "IfcRoof",
    "IfcColumn",
    "IfcBeam",
    "IfcMember",
    "IfcCovering",
    "IfcFurnishingElement",
    "IfcDistributionElement",
    "IfcProxy",
    "IfcAnnotation",
];

/// Index build configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexOptions {
    /// Requested classification names; each becomes a top-level index key
    pub entity_types: Vec<String>,
    /// Elements visited per requested type
    pub max_elements_per_type: usize,
    /// Distinct values kept per key
    pub max_values_per_key: usize,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            entity_types: DEFAULT_ENTITY_TYPES.iter().map(|s| s.to_string()).collect(),
            max_elements_per_type: 30_000,
            max_values_per_key: 1_000,
        }
    }
}

impl IndexOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entity_types<S: Into<String>>(
        mut self,
        types: impl IntoIterator<Item = S>,
    ) -> Self {
        self.entity_types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_max_elements_per_type(mut self, max: usize) -> Self {
        self.max_elements_per_type = max;
        self
    }

    pub fn with_max_values_per_key(mut self, max: usize) -> Self {
        self.max_values_per_key = max;
        self
    }
}

type KeyMap = BTreeMap<String, Vec<String>>;
type PsetMap = BTreeMap<String, KeyMap>;

/// `entity type -> pset name -> key -> sorted distinct values`
///
/// Serializes as the bare nested map.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PropertyIndex {
    entries: BTreeMap<String, PsetMap>,
    #[serde(skip)]
    revision: Option<u64>,
}

impl PropertyIndex {
    /// Indexed entity types, sorted
    pub fn entity_types(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Property set names under `scope`
    ///
    /// A wildcard scope unions every indexed type; an unknown scope is empty.
    pub fn pset_names(&self, scope: &str) -> Vec<String> {
        let names: BTreeSet<&String> = self.scoped(scope).flat_map(|psets| psets.keys()).collect();
        names.into_iter().cloned().collect()
    }

    /// Keys of `pset` under `scope`
    pub fn keys(&self, scope: &str, pset: &str) -> Vec<String> {
        let keys: BTreeSet<&String> = self
            .scoped(scope)
            .filter_map(|psets| psets.get(pset))
            .flat_map(|keys| keys.keys())
            .collect();
        keys.into_iter().cloned().collect()
    }

    /// Values of `key` in `pset` under `scope`
    pub fn values(&self, scope: &str, pset: &str, key: &str) -> Vec<String> {
        let values: BTreeSet<&String> = self
            .scoped(scope)
            .filter_map(|psets| psets.get(pset))
            .filter_map(|keys| keys.get(key))
            .flatten()
            .collect();
        values.into_iter().cloned().collect()
    }

    /// The raw nested map
    pub fn as_map(&self) -> &BTreeMap<String, BTreeMap<String, BTreeMap<String, Vec<String>>>> {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether this index was built from `model` in its current state
    pub fn is_current(&self, model: &Model) -> bool {
        self.revision == Some(model.revision())
    }

    fn scoped<'s>(&'s self, scope: &str) -> Box<dyn Iterator<Item = &'s PsetMap> + 's> {
        if is_wildcard_scope(scope) {
            Box::new(self.entries.values())
        } else {
            Box::new(self.entries.get(scope).into_iter())
        }
    }
}

/// One `(pset, key)` row of a flat survey
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyRow {
    pub pset: String,
    pub key: String,
    pub values: Vec<String>,
    pub count_values: usize,
}

/// Walks property sets of many elements
pub struct PropertyIndexer<'a> {
    resolver: &'a dyn EntityResolver,
    relations: Relations,
}

impl<'a> PropertyIndexer<'a> {
    pub fn new(resolver: &'a dyn EntityResolver) -> Self {
        Self {
            resolver,
            relations: Relations::build(resolver),
        }
    }

    fn accessor(&self) -> PropertyAccessor<'_> {
        PropertyAccessor::new(self.resolver, &self.relations)
    }

    /// Build the nested index for `options.entity_types`
    ///
    /// Property sets without a name and records without a key are skipped.
    /// Requested types without any element contribute nothing.
    pub fn build(&self, options: &IndexOptions) -> PropertyIndex {
        let accessor = self.accessor();
        let mut entries: BTreeMap<String, BTreeMap<String, BTreeMap<String, BTreeSet<String>>>> =
            BTreeMap::new();

        for requested in &options.entity_types {
            let elements = self.resolver.entities_by_type(&IfcType::parse(requested));
            if elements.len() > options.max_elements_per_type {
                log::debug!(
                    "Indexing first {} of {} {} elements",
                    options.max_elements_per_type,
                    elements.len(),
                    requested
                );
            }

            for element in elements.into_iter().take(options.max_elements_per_type) {
                for pset in accessor.property_sets(element.id) {
                    let name = pset_name(pset);
                    if name.is_empty() {
                        continue;
                    }
                    let keys = entries
                        .entry(requested.clone())
                        .or_default()
                        .entry(name.to_string())
                        .or_default();

                    for (key, value) in single_values(self.resolver, pset) {
                        if key.is_empty() {
                            continue;
                        }
                        let values = keys.entry(key.to_string()).or_default();
                        if values.len() < options.max_values_per_key {
                            values.insert(value_text(value));
                        }
                    }
                }
            }
        }

        let entries: BTreeMap<String, PsetMap> = entries
            .into_iter()
            .map(|(ty, psets)| {
                let psets = psets
                    .into_iter()
                    .map(|(pset, keys)| {
                        let keys = keys
                            .into_iter()
                            .map(|(key, values)| (key, values.into_iter().collect()))
                            .collect();
                        (pset, keys)
                    })
                    .collect();
                (ty, psets)
            })
            .collect();

        log::debug!("Built property index over {} entity types", entries.len());

        PropertyIndex {
            entries,
            revision: None,
        }
    }

    /// Distinct non-empty property set names, sorted
    ///
    /// `max_elements` is shared across all requested types. Collection stops
    /// once `max_psets` names are known.
    pub fn pset_names<S: AsRef<str>>(
        &self,
        entity_types: &[S],
        max_elements: usize,
        max_psets: usize,
    ) -> Vec<String> {
        let accessor = self.accessor();
        let mut names = BTreeSet::new();

        'scan: for element in self.limited_elements(entity_types, max_elements) {
            for pset in accessor.property_sets(element) {
                let name = pset_name(pset);
                if name.is_empty() {
                    continue;
                }
                names.insert(name.to_string());
                if names.len() >= max_psets {
                    break 'scan;
                }
            }
        }

        names.into_iter().collect()
    }

    /// Flat `(pset, key) -> values` listing for quick inspection
    ///
    /// Unlike [`PropertyIndexer::build`] nothing is skipped or capped except
    /// the shared element budget. Rows are sorted by `(pset, key)`.
    pub fn survey<S: AsRef<str>>(&self, entity_types: &[S], max_elements: usize) -> Vec<SurveyRow> {
        let accessor = self.accessor();
        let mut table: BTreeMap<(String, String), BTreeSet<String>> = BTreeMap::new();

        for element in self.limited_elements(entity_types, max_elements) {
            for pset in accessor.property_sets(element) {
                let name = pset_name(pset);
                for (key, value) in single_values(self.resolver, pset) {
                    table
                        .entry((name.to_string(), key.to_string()))
                        .or_default()
                        .insert(value_text(value));
                }
            }
        }

        table
            .into_iter()
            .map(|((pset, key), values)| SurveyRow {
                pset,
                key,
                count_values: values.len(),
                values: values.into_iter().collect(),
            })
            .collect()
    }

    /// Element ids of the requested types, at most `max_elements` overall
    fn limited_elements<S: AsRef<str>>(
        &self,
        entity_types: &[S],
        max_elements: usize,
    ) -> Vec<ifc_recolor_model::EntityId> {
        entity_types
            .iter()
            .flat_map(|ty| self.resolver.find_by_type_name(ty.as_ref()))
            .map(|entity| entity.id)
            .take(max_elements)
            .collect()
    }
}

/// Build a property index and stamp it with the model revision
pub fn build_index(model: &Model, options: &IndexOptions) -> PropertyIndex {
    let mut index = PropertyIndexer::new(model).build(options);
    index.revision = Some(model.revision());
    index
}

/// Sorted distinct classification names of product elements
///
/// Only the first `max_elements` products are looked at.
pub fn discover_entity_types(resolver: &dyn EntityResolver, max_elements: usize) -> Vec<String> {
    let names: BTreeSet<String> = resolver
        .entities_by_type(&IfcType::IfcProduct)
        .into_iter()
        .take(max_elements)
        .map(|entity| entity.ifc_type.name().to_string())
        .collect();
    names.into_iter().collect()
}

/// See [`PropertyIndexer::pset_names`]
pub fn pset_names<S: AsRef<str>>(
    resolver: &dyn EntityResolver,
    entity_types: &[S],
    max_elements: usize,
    max_psets: usize,
) -> Vec<String> {
    PropertyIndexer::new(resolver).pset_names(entity_types, max_elements, max_psets)
}

/// See [`PropertyIndexer::survey`]
pub fn survey<S: AsRef<str>>(
    resolver: &dyn EntityResolver,
    entity_types: &[S],
    max_elements: usize,
) -> Vec<SurveyRow> {
    PropertyIndexer::new(resolver).survey(entity_types, max_elements)
}
