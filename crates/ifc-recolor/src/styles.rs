// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Surface style discovery
//!
//! Walks from an element to every surface shading/rendering that can colour
//! it:
//!
//! 1. **Direct**: Representation -> Representations -> Items -> styles
//! 2. **Mapped**: mapped items of (1) -> MappingSource -> MappedRepresentation
//!    -> Items -> styles
//! 3. **Instance material**: associated materials -> HasRepresentation
//!    -> Representations -> Items -> styles
//! 4. **Type material**: (3) for each type object of the element
//!
//! Styles of an item come from the styled items pointing at it, or from the
//! item itself when it is a styled item. Style assignments and surface styles
//! are unwrapped down to their shading leaves.
//!
//! The paths are concatenated without deduplication. A style reachable twice
//! is reported twice.

use ifc_recolor_model::{
    schema, DecodedEntity, EntityId, EntityResolver, EntityResolverExt, IfcType, Relations,
};

/// Material containers nested deeper than this are not followed
pub const MAX_MATERIAL_DEPTH: usize = 16;

/// Traversal path a style was found on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StylePath {
    Direct,
    Mapped,
    InstanceMaterial,
    TypeMaterial,
}

/// A shading/rendering leaf reachable from an element
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StyleRef {
    pub style: EntityId,
    pub path: StylePath,
    /// SurfaceColour refers to an `IfcColourRgb`
    pub colorable: bool,
}

/// Resolves the surface styles of elements
#[derive(Clone, Copy)]
pub struct StyleResolver<'a> {
    resolver: &'a dyn EntityResolver,
    relations: &'a Relations,
}

impl<'a> StyleResolver<'a> {
    pub fn new(resolver: &'a dyn EntityResolver, relations: &'a Relations) -> Self {
        Self {
            resolver,
            relations,
        }
    }

    /// All styles of `element`, path by path
    pub fn styles_for(&self, element: &DecodedEntity, include_type_level: bool) -> Vec<StyleRef> {
        let mut styles = Vec::new();

        let items = self.representation_items(element);
        for item in &items {
            self.item_styles(item, StylePath::Direct, &mut styles);
        }

        for item in items.iter().filter(|item| item.is_a(&IfcType::IfcMappedItem)) {
            for source_item in self.mapped_items(item) {
                self.item_styles(source_item, StylePath::Mapped, &mut styles);
            }
        }

        for material in self.relations.materials(element.id) {
            self.material_styles(*material, StylePath::InstanceMaterial, &mut styles);
        }

        if include_type_level {
            for type_object in self.relations.typed_by(element.id) {
                for material in self.relations.materials(*type_object) {
                    self.material_styles(*material, StylePath::TypeMaterial, &mut styles);
                }
            }
        }

        log::trace!("{} styles reachable from {}", styles.len(), element.id);
        styles
    }

    /// Whether the leaf's SurfaceColour is an RGB colour
    pub fn is_colorable(&self, style: &DecodedEntity) -> bool {
        self.resolver
            .follow(style, schema::shading::SURFACE_COLOUR)
            .is_some_and(|colour| colour.is_a(&IfcType::IfcColourRgb))
    }

    fn representation_items(&self, element: &DecodedEntity) -> Vec<&'a DecodedEntity> {
        let resolver = self.resolver;
        let Some(shape) = element
            .get_ref(schema::product::REPRESENTATION)
            .and_then(|id| resolver.get(id))
        else {
            return Vec::new();
        };

        resolver
            .follow_all(shape, schema::product_representation::REPRESENTATIONS)
            .into_iter()
            .flat_map(|rep| resolver.follow_all(rep, schema::representation::ITEMS))
            .collect()
    }

    /// Items of the representation a mapped item points at
    fn mapped_items(&self, mapped: &DecodedEntity) -> Vec<&'a DecodedEntity> {
        let resolver = self.resolver;
        mapped
            .get_ref(schema::mapped_item::MAPPING_SOURCE)
            .and_then(|id| resolver.get(id))
            .and_then(|map| {
                map.get_ref(schema::representation_map::MAPPED_REPRESENTATION)
                    .and_then(|id| resolver.get(id))
            })
            .map(|rep| resolver.follow_all(rep, schema::representation::ITEMS))
            .unwrap_or_default()
    }

    fn item_styles(&self, item: &DecodedEntity, path: StylePath, out: &mut Vec<StyleRef>) {
        if item.is_a(&IfcType::IfcStyledItem) {
            self.styled_item_styles(item, path, out);
            return;
        }
        for styled in self.relations.styled_by_item(item.id) {
            if let Some(styled) = self.resolver.get(*styled) {
                self.styled_item_styles(styled, path, out);
            }
        }
    }

    fn styled_item_styles(
        &self,
        styled: &DecodedEntity,
        path: StylePath,
        out: &mut Vec<StyleRef>,
    ) {
        for container in self.resolver.follow_all(styled, schema::styled_item::STYLES) {
            if container.is_a(&IfcType::IfcPresentationStyleAssignment) {
                let styles = self
                    .resolver
                    .follow_all(container, schema::style_assignment::STYLES);
                for style in styles {
                    if style.is_a(&IfcType::IfcSurfaceStyle) {
                        self.surface_style_leaves(style, path, out);
                    }
                }
            } else if container.is_a(&IfcType::IfcSurfaceStyle) {
                self.surface_style_leaves(container, path, out);
            }
        }
    }

    fn surface_style_leaves(
        &self,
        style: &DecodedEntity,
        path: StylePath,
        out: &mut Vec<StyleRef>,
    ) {
        for leaf in self.resolver.follow_all(style, schema::surface_style::STYLES) {
            if leaf.is_a(&IfcType::IfcSurfaceStyleShading) {
                out.push(StyleRef {
                    style: leaf.id,
                    path,
                    colorable: self.is_colorable(leaf),
                });
            }
        }
    }

    fn material_styles(&self, material: EntityId, path: StylePath, out: &mut Vec<StyleRef>) {
        let mut nodes = Vec::new();
        self.material_nodes(material, &mut Vec::new(), &mut nodes);

        for node in nodes {
            for definition in self.relations.has_representation(node) {
                let Some(definition) = self.resolver.get(*definition) else {
                    continue;
                };
                let reps = self
                    .resolver
                    .follow_all(definition, schema::material_representation::REPRESENTATIONS);
                for rep in reps {
                    for item in self.resolver.follow_all(rep, schema::representation::ITEMS) {
                        self.item_styles(item, path, out);
                    }
                }
            }
        }
    }

    /// Pre-order walk from a material selection down to leaf materials
    ///
    /// Every node is kept, wrappers included, in visiting order. `trail` holds
    /// the containers above `id`; a node already on it is a cycle and skipped.
    fn material_nodes(&self, id: EntityId, trail: &mut Vec<EntityId>, out: &mut Vec<EntityId>) {
        if trail.contains(&id) {
            log::warn!("Material {} contains itself", id);
            return;
        }
        if trail.len() > MAX_MATERIAL_DEPTH {
            log::warn!("Material nesting deeper than {} at {}", MAX_MATERIAL_DEPTH, id);
            return;
        }
        let Some(node) = self.resolver.get(id) else {
            return;
        };
        out.push(id);

        let wrapped = match node.ifc_type {
            IfcType::IfcMaterialLayerSetUsage => {
                node.get_ref(schema::layer_set_usage::FOR_LAYER_SET)
            }
            IfcType::IfcMaterialProfileSetUsage => {
                node.get_ref(schema::profile_set_usage::FOR_PROFILE_SET)
            }
            _ => None,
        };

        let members = match node.ifc_type {
            IfcType::IfcMaterialList => node.get_refs(schema::material_list::MATERIALS),
            IfcType::IfcMaterialLayerSet => node.get_refs(schema::layer_set::MATERIAL_LAYERS),
            IfcType::IfcMaterialProfileSet => {
                node.get_refs(schema::profile_set::MATERIAL_PROFILES)
            }
            IfcType::IfcMaterialConstituentSet => {
                node.get_refs(schema::constituent_set::MATERIAL_CONSTITUENTS)
            }
            _ => Vec::new(),
        };

        trail.push(id);
        if let Some(wrapped) = wrapped {
            self.material_nodes(wrapped, trail, out);
        }
        for member in members {
            let next = self.member_material(member).unwrap_or(member);
            self.material_nodes(next, trail, out);
        }
        trail.pop();
    }

    /// Material of a layer, profile or constituent
    fn member_material(&self, member: EntityId) -> Option<EntityId> {
        let member = self.resolver.get(member)?;
        let index = match member.ifc_type {
            IfcType::IfcMaterialLayer => schema::layer::MATERIAL,
            IfcType::IfcMaterialProfile => schema::profile::MATERIAL,
            IfcType::IfcMaterialConstituent => schema::constituent::MATERIAL,
            _ => return None,
        };
        member.get_ref(index)
    }
}
