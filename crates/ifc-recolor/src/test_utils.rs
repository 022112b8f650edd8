// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Model fixtures shared by unit and integration tests

#![allow(dead_code)]

use ifc_recolor_model::{AttributeValue, EntityId, IfcType, Model};

/// Small builder that lays out entities with IFC4 attribute positions
pub struct Fixture {
    pub model: Model,
    next_gid: u32,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            model: Model::new(),
            next_gid: 0,
        }
    }

    pub fn into_model(self) -> Model {
        self.model
    }

    /// Append an entity with the next free id
    pub fn add(&mut self, ty: IfcType, attrs: Vec<AttributeValue>) -> EntityId {
        self.model.add(ty, attrs).unwrap()
    }

    fn gid(&mut self) -> AttributeValue {
        self.next_gid += 1;
        AttributeValue::String(format!("gid-{:04}", self.next_gid))
    }

    /// IfcRoot prefix (GlobalId, OwnerHistory, Name, Description) plus `tail`
    fn rooted(
        &mut self,
        ty: IfcType,
        name: Option<&str>,
        tail: Vec<AttributeValue>,
    ) -> EntityId {
        let mut attrs = vec![
            self.gid(),
            AttributeValue::Null,
            name.map_or(AttributeValue::Null, |n| AttributeValue::String(n.into())),
            AttributeValue::Null,
        ];
        attrs.extend(tail);
        self.add(ty, attrs)
    }

    /// Product with empty ObjectType, ObjectPlacement, Representation and Tag
    pub fn element(&mut self, ty: IfcType, name: &str) -> EntityId {
        self.rooted(ty, Some(name), vec![AttributeValue::Null; 4])
    }

    /// Product without a GlobalId
    pub fn anonymous_element(&mut self, ty: IfcType) -> EntityId {
        let mut attrs = vec![AttributeValue::Null; 8];
        attrs[2] = AttributeValue::String("anonymous".into());
        self.add(ty, attrs)
    }

    /// Type object (IfcTypeObject layout, no representation maps)
    pub fn type_object(&mut self, ty: IfcType, name: &str) -> EntityId {
        self.rooted(ty, Some(name), vec![AttributeValue::Null; 6])
    }

    /// Property set of single values attached to `objects`
    pub fn pset(
        &mut self,
        objects: &[EntityId],
        name: &str,
        props: &[(&str, AttributeValue)],
    ) -> EntityId {
        let props: Vec<EntityId> = props
            .iter()
            .map(|(key, value)| self.single_value(key, value.clone()))
            .collect();
        let pset = self.rooted(
            IfcType::IfcPropertySet,
            Some(name),
            vec![AttributeValue::refs(props)],
        );
        self.defines_by_properties(objects, pset);
        pset
    }

    pub fn single_value(&mut self, key: &str, value: AttributeValue) -> EntityId {
        self.add(
            IfcType::IfcPropertySingleValue,
            vec![
                AttributeValue::String(key.into()),
                AttributeValue::Null,
                value,
                AttributeValue::Null,
            ],
        )
    }

    pub fn defines_by_properties(
        &mut self,
        objects: &[EntityId],
        definition: EntityId,
    ) -> EntityId {
        self.rooted(
            IfcType::IfcRelDefinesByProperties,
            None,
            vec![
                AttributeValue::refs(objects.iter().copied()),
                AttributeValue::EntityRef(definition),
            ],
        )
    }

    pub fn defines_by_type(&mut self, objects: &[EntityId], type_object: EntityId) -> EntityId {
        self.rooted(
            IfcType::IfcRelDefinesByType,
            None,
            vec![
                AttributeValue::refs(objects.iter().copied()),
                AttributeValue::EntityRef(type_object),
            ],
        )
    }

    pub fn associates_material(&mut self, objects: &[EntityId], material: EntityId) -> EntityId {
        self.rooted(
            IfcType::IfcRelAssociatesMaterial,
            None,
            vec![
                AttributeValue::refs(objects.iter().copied()),
                AttributeValue::EntityRef(material),
            ],
        )
    }

    // ------------------------------------------------------------------------
    // Presentation
    // ------------------------------------------------------------------------

    pub fn colour(&mut self, r: f64, g: f64, b: f64) -> EntityId {
        self.add(
            IfcType::IfcColourRgb,
            vec![
                AttributeValue::Null,
                AttributeValue::Float(r),
                AttributeValue::Float(g),
                AttributeValue::Float(b),
            ],
        )
    }

    /// Rendering leaf whose SurfaceColour points at `colour`
    pub fn rendering(&mut self, colour: EntityId) -> EntityId {
        let mut attrs = vec![AttributeValue::EntityRef(colour), AttributeValue::Float(0.0)];
        attrs.extend(vec![AttributeValue::Null; 7]);
        attrs.push(AttributeValue::Enum("NOTDEFINED".into()));
        self.add(IfcType::IfcSurfaceStyleRendering, attrs)
    }

    /// Rendering leaf with a pre-defined (non-RGB) colour
    pub fn predefined_rendering(&mut self) -> EntityId {
        let colour = self.add(
            IfcType::IfcDraughtingPreDefinedColour,
            vec![AttributeValue::String("red".into())],
        );
        self.rendering(colour)
    }

    pub fn surface_style(&mut self, leaves: &[EntityId]) -> EntityId {
        self.add(
            IfcType::IfcSurfaceStyle,
            vec![
                AttributeValue::Null,
                AttributeValue::Enum("BOTH".into()),
                AttributeValue::refs(leaves.iter().copied()),
            ],
        )
    }

    pub fn style_assignment(&mut self, styles: &[EntityId]) -> EntityId {
        self.add(
            IfcType::IfcPresentationStyleAssignment,
            vec![AttributeValue::refs(styles.iter().copied())],
        )
    }

    pub fn styled_item(&mut self, item: Option<EntityId>, styles: &[EntityId]) -> EntityId {
        self.add(
            IfcType::IfcStyledItem,
            vec![
                item.map_or(AttributeValue::Null, AttributeValue::EntityRef),
                AttributeValue::refs(styles.iter().copied()),
                AttributeValue::Null,
            ],
        )
    }

    pub fn solid(&mut self) -> EntityId {
        self.add(IfcType::IfcExtrudedAreaSolid, vec![AttributeValue::Null; 4])
    }

    pub fn shape(&mut self, items: &[EntityId]) -> EntityId {
        self.add(
            IfcType::IfcShapeRepresentation,
            vec![
                AttributeValue::Null,
                AttributeValue::String("Body".into()),
                AttributeValue::String("SweptSolid".into()),
                AttributeValue::refs(items.iter().copied()),
            ],
        )
    }

    pub fn styled_representation(&mut self, items: &[EntityId]) -> EntityId {
        self.add(
            IfcType::IfcStyledRepresentation,
            vec![
                AttributeValue::Null,
                AttributeValue::Null,
                AttributeValue::Null,
                AttributeValue::refs(items.iter().copied()),
            ],
        )
    }

    /// Attach shape representations to `element` through a product shape
    pub fn represent(&mut self, element: EntityId, shapes: &[EntityId]) -> EntityId {
        let pds = self.add(
            IfcType::IfcProductDefinitionShape,
            vec![
                AttributeValue::Null,
                AttributeValue::Null,
                AttributeValue::refs(shapes.iter().copied()),
            ],
        );
        self.model
            .set_attribute(element, 6, AttributeValue::EntityRef(pds))
            .expect("element has a Representation slot");
        pds
    }

    /// Mapped item whose source representation holds `items`
    pub fn mapped_item(&mut self, items: &[EntityId]) -> EntityId {
        let source_rep = self.shape(items);
        let map = self.add(
            IfcType::IfcRepresentationMap,
            vec![AttributeValue::Null, AttributeValue::EntityRef(source_rep)],
        );
        self.add(
            IfcType::IfcMappedItem,
            vec![AttributeValue::EntityRef(map), AttributeValue::Null],
        )
    }

    /// Solid styled with one new RGB colour; returns (solid, rendering)
    pub fn painted_solid(&mut self, rgb: (f64, f64, f64)) -> (EntityId, EntityId) {
        let colour = self.colour(rgb.0, rgb.1, rgb.2);
        let rendering = self.rendering(colour);
        let style = self.surface_style(&[rendering]);
        let solid = self.solid();
        self.styled_item(Some(solid), &[style]);
        (solid, rendering)
    }

    /// Element with one directly styled body; returns (element, rendering)
    pub fn painted_element(
        &mut self,
        ty: IfcType,
        name: &str,
        rgb: (f64, f64, f64),
    ) -> (EntityId, EntityId) {
        let element = self.element(ty, name);
        let (solid, rendering) = self.painted_solid(rgb);
        let shape = self.shape(&[solid]);
        self.represent(element, &[shape]);
        (element, rendering)
    }

    // ------------------------------------------------------------------------
    // Materials
    // ------------------------------------------------------------------------

    pub fn material(&mut self, name: &str) -> EntityId {
        self.add(
            IfcType::IfcMaterial,
            vec![
                AttributeValue::String(name.into()),
                AttributeValue::Null,
                AttributeValue::Null,
            ],
        )
    }

    /// Material with a styled representation; returns (material, rendering)
    pub fn painted_material(&mut self, name: &str, rgb: (f64, f64, f64)) -> (EntityId, EntityId) {
        let material = self.material(name);
        let rendering = self.paint_definition(material, rgb);
        (material, rendering)
    }

    /// Give any material definition a styled representation; returns the rendering
    pub fn paint_definition(&mut self, definition: EntityId, rgb: (f64, f64, f64)) -> EntityId {
        let colour = self.colour(rgb.0, rgb.1, rgb.2);
        let rendering = self.rendering(colour);
        let style = self.surface_style(&[rendering]);
        let styled = self.styled_item(None, &[style]);
        let rep = self.styled_representation(&[styled]);
        self.add(
            IfcType::IfcMaterialDefinitionRepresentation,
            vec![
                AttributeValue::Null,
                AttributeValue::Null,
                AttributeValue::refs([rep]),
                AttributeValue::EntityRef(definition),
            ],
        );
        rendering
    }

    /// Layer whose Material may be unset
    pub fn layer(&mut self, material: Option<EntityId>) -> EntityId {
        self.add(
            IfcType::IfcMaterialLayer,
            vec![
                material.map_or(AttributeValue::Null, AttributeValue::EntityRef),
                AttributeValue::Float(0.1),
            ],
        )
    }

    pub fn layer_set(&mut self, materials: &[EntityId]) -> EntityId {
        let layers: Vec<EntityId> = materials.iter().map(|m| self.layer(Some(*m))).collect();
        self.layer_set_of(&layers)
    }

    pub fn layer_set_of(&mut self, layers: &[EntityId]) -> EntityId {
        self.add(
            IfcType::IfcMaterialLayerSet,
            vec![AttributeValue::refs(layers.iter().copied()), AttributeValue::Null],
        )
    }

    pub fn layer_set_usage(&mut self, layer_set: EntityId) -> EntityId {
        self.add(
            IfcType::IfcMaterialLayerSetUsage,
            vec![
                AttributeValue::EntityRef(layer_set),
                AttributeValue::Enum("AXIS2".into()),
                AttributeValue::Enum("POSITIVE".into()),
                AttributeValue::Float(0.0),
            ],
        )
    }

    pub fn material_list(&mut self, materials: &[EntityId]) -> EntityId {
        self.add(
            IfcType::IfcMaterialList,
            vec![AttributeValue::refs(materials.iter().copied())],
        )
    }

    pub fn profile_set(&mut self, materials: &[EntityId]) -> EntityId {
        let profiles: Vec<EntityId> = materials
            .iter()
            .map(|m| {
                self.add(
                    IfcType::IfcMaterialProfile,
                    vec![
                        AttributeValue::Null,
                        AttributeValue::Null,
                        AttributeValue::EntityRef(*m),
                        AttributeValue::Null,
                    ],
                )
            })
            .collect();
        self.add(
            IfcType::IfcMaterialProfileSet,
            vec![
                AttributeValue::Null,
                AttributeValue::Null,
                AttributeValue::refs(profiles),
                AttributeValue::Null,
            ],
        )
    }

    pub fn profile_set_usage(&mut self, profile_set: EntityId) -> EntityId {
        self.add(
            IfcType::IfcMaterialProfileSetUsage,
            vec![
                AttributeValue::EntityRef(profile_set),
                AttributeValue::Null,
                AttributeValue::Null,
            ],
        )
    }

    pub fn constituent_set(&mut self, materials: &[EntityId]) -> EntityId {
        let constituents: Vec<EntityId> = materials
            .iter()
            .map(|m| {
                self.add(
                    IfcType::IfcMaterialConstituent,
                    vec![
                        AttributeValue::Null,
                        AttributeValue::Null,
                        AttributeValue::EntityRef(*m),
                        AttributeValue::Null,
                        AttributeValue::Null,
                    ],
                )
            })
            .collect();
        self.add(
            IfcType::IfcMaterialConstituentSet,
            vec![
                AttributeValue::Null,
                AttributeValue::Null,
                AttributeValue::refs(constituents),
            ],
        )
    }
}

/// `IFCLABEL('text')`
pub fn label(text: &str) -> AttributeValue {
    AttributeValue::typed("IFCLABEL", AttributeValue::String(text.into()))
}
