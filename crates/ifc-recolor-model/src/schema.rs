// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Attribute positions (IFC4 layout) for the entities the engine walks
//!
//! Positions count every attribute of the entity including inherited ones,
//! matching the order in which a STEP instance lists them.

/// IfcRoot: GlobalId, OwnerHistory, Name, Description
pub mod root {
    pub const GLOBAL_ID: usize = 0;
    pub const OWNER_HISTORY: usize = 1;
    pub const NAME: usize = 2;
    pub const DESCRIPTION: usize = 3;
}

/// IfcProduct: ..., ObjectType, ObjectPlacement, Representation
pub mod product {
    pub const OBJECT_TYPE: usize = 4;
    pub const OBJECT_PLACEMENT: usize = 5;
    pub const REPRESENTATION: usize = 6;
}

/// IfcRelDefinesByProperties / IfcRelDefinesByType / IfcRelAssociatesMaterial
pub mod relationship {
    pub const RELATED_OBJECTS: usize = 4;
    /// RelatingPropertyDefinition, RelatingType or RelatingMaterial
    pub const RELATING: usize = 5;
}

/// IfcPropertySet: ..., HasProperties
pub mod property_set {
    pub const NAME: usize = super::root::NAME;
    pub const HAS_PROPERTIES: usize = 4;
}

/// IfcPropertySingleValue: Name, Description, NominalValue, Unit
pub mod property {
    pub const NAME: usize = 0;
    pub const NOMINAL_VALUE: usize = 2;
    pub const UNIT: usize = 3;
}

/// IfcProductRepresentation: Name, Description, Representations
pub mod product_representation {
    pub const REPRESENTATIONS: usize = 2;
}

/// IfcMaterialDefinitionRepresentation: ..., Representations, RepresentedMaterial
pub mod material_representation {
    pub const REPRESENTATIONS: usize = super::product_representation::REPRESENTATIONS;
    pub const REPRESENTED_MATERIAL: usize = 3;
}

/// IfcRepresentation: ContextOfItems, RepresentationIdentifier, RepresentationType, Items
pub mod representation {
    pub const ITEMS: usize = 3;
}

/// IfcMappedItem: MappingSource, MappingTarget
pub mod mapped_item {
    pub const MAPPING_SOURCE: usize = 0;
}

/// IfcRepresentationMap: MappingOrigin, MappedRepresentation
pub mod representation_map {
    pub const MAPPED_REPRESENTATION: usize = 1;
}

/// IfcStyledItem: Item, Styles, Name
pub mod styled_item {
    pub const ITEM: usize = 0;
    pub const STYLES: usize = 1;
    pub const NAME: usize = 2;
}

/// IfcPresentationStyleAssignment: Styles
pub mod style_assignment {
    pub const STYLES: usize = 0;
}

/// IfcSurfaceStyle: Name, Side, Styles
pub mod surface_style {
    pub const NAME: usize = 0;
    pub const SIDE: usize = 1;
    pub const STYLES: usize = 2;
}

/// IfcSurfaceStyleShading / IfcSurfaceStyleRendering: SurfaceColour, Transparency, ...
pub mod shading {
    pub const SURFACE_COLOUR: usize = 0;
    pub const TRANSPARENCY: usize = 1;
}

/// IfcColourRgb: Name, Red, Green, Blue
pub mod colour_rgb {
    pub const NAME: usize = 0;
    pub const RED: usize = 1;
    pub const GREEN: usize = 2;
    pub const BLUE: usize = 3;
}

/// IfcMaterial: Name, Description, Category
pub mod material {
    pub const NAME: usize = 0;
}

/// IfcMaterialLayerSetUsage: ForLayerSet, ...
pub mod layer_set_usage {
    pub const FOR_LAYER_SET: usize = 0;
}

/// IfcMaterialProfileSetUsage: ForProfileSet, ...
pub mod profile_set_usage {
    pub const FOR_PROFILE_SET: usize = 0;
}

/// IfcMaterialLayerSet: MaterialLayers, LayerSetName, Description
pub mod layer_set {
    pub const MATERIAL_LAYERS: usize = 0;
}

/// IfcMaterialLayer: Material, LayerThickness, ...
pub mod layer {
    pub const MATERIAL: usize = 0;
}

/// IfcMaterialProfileSet: Name, Description, MaterialProfiles, CompositeProfile
pub mod profile_set {
    pub const MATERIAL_PROFILES: usize = 2;
}

/// IfcMaterialProfile: Name, Description, Material, Profile, ...
pub mod profile {
    pub const MATERIAL: usize = 2;
}

/// IfcMaterialConstituentSet: Name, Description, MaterialConstituents
pub mod constituent_set {
    pub const MATERIAL_CONSTITUENTS: usize = 2;
}

/// IfcMaterialConstituent: Name, Description, Material, Fraction, Category
pub mod constituent {
    pub const MATERIAL: usize = 2;
}

/// IfcMaterialList: Materials
pub mod material_list {
    pub const MATERIALS: usize = 0;
}
