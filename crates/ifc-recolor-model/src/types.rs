// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for IFC graph representation
//!
//! Entities are kept the way a STEP decoder produces them: a type tag plus an
//! ordered attribute list. The classification hierarchy is encoded once in
//! the [`ifc_types!`] table so `is_a` checks are a walk up the supertype chain.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe entity identifier
///
/// Wraps the raw IFC entity ID (e.g., #123 becomes EntityId(123))
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize, Default,
)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        EntityId(id)
    }
}

impl From<EntityId> for u32 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

macro_rules! supertype_of {
    () => {
        None
    };
    ($parent:ident) => {
        Some(IfcType::$parent)
    };
}

/// Declares the known classifications together with their direct supertype.
///
/// Entries without a parent are hierarchy roots (IfcRoot for the object
/// tree, plus the resource roots for presentation, materials, etc.).
macro_rules! ifc_types {
    ($( $variant:ident $(: $parent:ident)? ),* $(,)?) => {
        /// IFC entity classification
        ///
        /// Unknown types are captured with their original string representation
        /// and have no supertype.
        #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
        pub enum IfcType {
            $( $variant, )*
            /// Unknown type - stores the original type name string
            Unknown(String),
        }

        impl IfcType {
            /// Parse a type name (case-insensitive, `IFCWALL` or `IfcWall`)
            pub fn parse(s: &str) -> Self {
                let s = s.trim();
                $(
                    if s.eq_ignore_ascii_case(stringify!($variant)) {
                        return IfcType::$variant;
                    }
                )*
                IfcType::Unknown(s.to_string())
            }

            /// Schema spelling of the type name (e.g. `IfcWall`)
            pub fn name(&self) -> &str {
                match self {
                    $( IfcType::$variant => stringify!($variant), )*
                    IfcType::Unknown(s) => s,
                }
            }

            /// Direct supertype, `None` for roots and unknown types
            pub fn supertype(&self) -> Option<IfcType> {
                match self {
                    $( IfcType::$variant => supertype_of!($($parent)?), )*
                    IfcType::Unknown(_) => None,
                }
            }
        }
    };
}

ifc_types! {
    // ========================================================================
    // Object tree
    // ========================================================================
    IfcRoot,
    IfcObjectDefinition: IfcRoot,
    IfcObject: IfcObjectDefinition,
    IfcContext: IfcObjectDefinition,
    IfcProject: IfcContext,
    IfcProduct: IfcObject,
    IfcProxy: IfcProduct,
    IfcAnnotation: IfcProduct,

    // Spatial structure
    IfcSpatialElement: IfcProduct,
    IfcSpatialStructureElement: IfcSpatialElement,
    IfcSite: IfcSpatialStructureElement,
    IfcBuilding: IfcSpatialStructureElement,
    IfcBuildingStorey: IfcSpatialStructureElement,
    IfcSpace: IfcSpatialStructureElement,

    // Elements
    IfcElement: IfcProduct,
    IfcBuildingElement: IfcElement,
    IfcWall: IfcBuildingElement,
    IfcWallStandardCase: IfcWall,
    IfcCurtainWall: IfcBuildingElement,
    IfcSlab: IfcBuildingElement,
    IfcRoof: IfcBuildingElement,
    IfcBeam: IfcBuildingElement,
    IfcColumn: IfcBuildingElement,
    IfcDoor: IfcBuildingElement,
    IfcWindow: IfcBuildingElement,
    IfcStair: IfcBuildingElement,
    IfcStairFlight: IfcBuildingElement,
    IfcRamp: IfcBuildingElement,
    IfcRampFlight: IfcBuildingElement,
    IfcRailing: IfcBuildingElement,
    IfcCovering: IfcBuildingElement,
    IfcPlate: IfcBuildingElement,
    IfcMember: IfcBuildingElement,
    IfcFooting: IfcBuildingElement,
    IfcPile: IfcBuildingElement,
    IfcBuildingElementProxy: IfcBuildingElement,
    IfcFurnishingElement: IfcElement,
    IfcFurniture: IfcFurnishingElement,
    IfcDistributionElement: IfcElement,
    IfcDistributionFlowElement: IfcDistributionElement,
    IfcFlowTerminal: IfcDistributionFlowElement,
    IfcFlowSegment: IfcDistributionFlowElement,
    IfcFlowFitting: IfcDistributionFlowElement,
    IfcGeographicElement: IfcElement,
    IfcElementAssembly: IfcElement,
    IfcFeatureElement: IfcElement,
    IfcFeatureElementSubtraction: IfcFeatureElement,
    IfcOpeningElement: IfcFeatureElementSubtraction,

    // Type objects
    IfcTypeObject: IfcObjectDefinition,
    IfcTypeProduct: IfcTypeObject,
    IfcElementType: IfcTypeProduct,
    IfcBuildingElementType: IfcElementType,
    IfcWallType: IfcBuildingElementType,
    IfcSlabType: IfcBuildingElementType,
    IfcBeamType: IfcBuildingElementType,
    IfcColumnType: IfcBuildingElementType,
    IfcDoorType: IfcBuildingElementType,
    IfcWindowType: IfcBuildingElementType,
    IfcCoveringType: IfcBuildingElementType,
    IfcMemberType: IfcBuildingElementType,
    IfcPlateType: IfcBuildingElementType,
    IfcRoofType: IfcBuildingElementType,
    IfcBuildingElementProxyType: IfcBuildingElementType,
    IfcFurnishingElementType: IfcElementType,
    IfcFurnitureType: IfcFurnishingElementType,
    IfcGeographicElementType: IfcElementType,

    // ========================================================================
    // Relationships
    // ========================================================================
    IfcRelationship: IfcRoot,
    IfcRelDefines: IfcRelationship,
    IfcRelDefinesByProperties: IfcRelDefines,
    IfcRelDefinesByType: IfcRelDefines,
    IfcRelAssociates: IfcRelationship,
    IfcRelAssociatesMaterial: IfcRelAssociates,
    IfcRelDecomposes: IfcRelationship,
    IfcRelAggregates: IfcRelDecomposes,
    IfcRelConnects: IfcRelationship,
    IfcRelContainedInSpatialStructure: IfcRelConnects,

    // ========================================================================
    // Properties
    // ========================================================================
    IfcPropertyDefinition: IfcRoot,
    IfcPropertySetDefinition: IfcPropertyDefinition,
    IfcPropertySet: IfcPropertySetDefinition,
    IfcElementQuantity: IfcPropertySetDefinition,
    IfcPropertyAbstraction,
    IfcProperty: IfcPropertyAbstraction,
    IfcSimpleProperty: IfcProperty,
    IfcPropertySingleValue: IfcSimpleProperty,
    IfcPropertyEnumeratedValue: IfcSimpleProperty,
    IfcPropertyBoundedValue: IfcSimpleProperty,
    IfcPropertyListValue: IfcSimpleProperty,
    IfcComplexProperty: IfcProperty,

    // ========================================================================
    // Representations and geometry items
    // ========================================================================
    IfcProductRepresentation,
    IfcProductDefinitionShape: IfcProductRepresentation,
    IfcMaterialDefinitionRepresentation: IfcProductRepresentation,
    IfcRepresentation,
    IfcShapeModel: IfcRepresentation,
    IfcShapeRepresentation: IfcShapeModel,
    IfcStyleModel: IfcRepresentation,
    IfcStyledRepresentation: IfcStyleModel,
    IfcRepresentationMap,
    IfcRepresentationItem,
    IfcMappedItem: IfcRepresentationItem,
    IfcStyledItem: IfcRepresentationItem,
    IfcGeometricRepresentationItem: IfcRepresentationItem,
    IfcSolidModel: IfcGeometricRepresentationItem,
    IfcSweptAreaSolid: IfcSolidModel,
    IfcExtrudedAreaSolid: IfcSweptAreaSolid,
    IfcManifoldSolidBrep: IfcSolidModel,
    IfcFacetedBrep: IfcManifoldSolidBrep,
    IfcTessellatedItem: IfcGeometricRepresentationItem,
    IfcTessellatedFaceSet: IfcTessellatedItem,
    IfcTriangulatedFaceSet: IfcTessellatedFaceSet,
    IfcPolygonalFaceSet: IfcTessellatedFaceSet,
    IfcBooleanResult: IfcGeometricRepresentationItem,
    IfcBooleanClippingResult: IfcBooleanResult,

    // ========================================================================
    // Presentation (styling)
    // ========================================================================
    IfcPresentationStyle,
    IfcSurfaceStyle: IfcPresentationStyle,
    IfcPresentationStyleAssignment,
    IfcPresentationItem,
    IfcSurfaceStyleShading: IfcPresentationItem,
    IfcSurfaceStyleRendering: IfcSurfaceStyleShading,
    IfcColourSpecification: IfcPresentationItem,
    IfcColourRgb: IfcColourSpecification,
    IfcPreDefinedItem: IfcPresentationItem,
    IfcPreDefinedColour: IfcPreDefinedItem,
    IfcDraughtingPreDefinedColour: IfcPreDefinedColour,

    // ========================================================================
    // Materials
    // ========================================================================
    IfcMaterialDefinition,
    IfcMaterial: IfcMaterialDefinition,
    IfcMaterialLayer: IfcMaterialDefinition,
    IfcMaterialLayerSet: IfcMaterialDefinition,
    IfcMaterialProfile: IfcMaterialDefinition,
    IfcMaterialProfileSet: IfcMaterialDefinition,
    IfcMaterialConstituent: IfcMaterialDefinition,
    IfcMaterialConstituentSet: IfcMaterialDefinition,
    IfcMaterialUsageDefinition,
    IfcMaterialLayerSetUsage: IfcMaterialUsageDefinition,
    IfcMaterialProfileSetUsage: IfcMaterialUsageDefinition,
    IfcMaterialList,
}

impl FromStr for IfcType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl IfcType {
    /// Check whether this type equals or specializes `ancestor`
    pub fn is_a(&self, ancestor: &IfcType) -> bool {
        if let (IfcType::Unknown(own), IfcType::Unknown(other)) = (self, ancestor) {
            return own.eq_ignore_ascii_case(other);
        }

        self.ancestors().any(|ty| &ty == ancestor)
    }

    /// Iterate this type followed by all of its supertypes
    pub fn ancestors(&self) -> impl Iterator<Item = IfcType> {
        std::iter::successors(Some(self.clone()), |ty| ty.supertype())
    }

    /// Whether this type is a known schema type
    pub fn is_known(&self) -> bool {
        !matches!(self, IfcType::Unknown(_))
    }
}

impl Default for IfcType {
    fn default() -> Self {
        IfcType::Unknown(String::new())
    }
}

impl fmt::Display for IfcType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Decoded attribute value
///
/// Represents any value that can appear in an IFC entity's attribute list.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum AttributeValue {
    /// Null value ($)
    #[default]
    Null,
    /// Derived value (*)
    Derived,
    /// Entity reference (#123)
    EntityRef(EntityId),
    /// Boolean value
    Bool(bool),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
    /// Enumeration value (.VALUE.)
    Enum(String),
    /// List of values
    List(Vec<AttributeValue>),
    /// Typed value like IFCLABEL('text')
    TypedValue(String, Vec<AttributeValue>),
}

impl AttributeValue {
    /// Build a list of entity references
    pub fn refs(ids: impl IntoIterator<Item = EntityId>) -> Self {
        AttributeValue::List(ids.into_iter().map(AttributeValue::EntityRef).collect())
    }

    /// Build a typed value with a single wrapped argument, e.g. `IFCLABEL('x')`
    pub fn typed(type_name: impl Into<String>, inner: AttributeValue) -> Self {
        AttributeValue::TypedValue(type_name.into(), vec![inner])
    }

    /// Try to get as entity reference
    pub fn as_entity_ref(&self) -> Option<EntityId> {
        match self {
            AttributeValue::EntityRef(id) => Some(*id),
            _ => None,
        }
    }

    /// Try to get as string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            AttributeValue::TypedValue(_, args) if !args.is_empty() => args[0].as_string(),
            _ => None,
        }
    }

    /// Try to get as float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            AttributeValue::Float(f) => Some(*f),
            AttributeValue::Integer(i) => Some(*i as f64),
            AttributeValue::TypedValue(_, args) if !args.is_empty() => args[0].as_float(),
            _ => None,
        }
    }

    /// Try to get as boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(b) => Some(*b),
            AttributeValue::Enum(s) => match s.to_uppercase().as_str() {
                "TRUE" | "T" => Some(true),
                "FALSE" | "F" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Try to get as list
    pub fn as_list(&self) -> Option<&[AttributeValue]> {
        match self {
            AttributeValue::List(list) => Some(list),
            _ => None,
        }
    }

    /// Check if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }

    /// Unwrap typed values down to the primitive they carry
    ///
    /// `IFCLABEL('Brick')` becomes `'Brick'`; anything else is returned as is.
    pub fn unwrap_typed(&self) -> &AttributeValue {
        match self {
            AttributeValue::TypedValue(_, args) if !args.is_empty() => args[0].unwrap_typed(),
            other => other,
        }
    }

    /// Entity references held directly or in a list
    ///
    /// A single reference yields one id; a list yields every reference it
    /// contains. Other values yield nothing.
    pub fn entity_refs(&self) -> Vec<EntityId> {
        match self {
            AttributeValue::EntityRef(id) => vec![*id],
            AttributeValue::List(items) => items.iter().filter_map(|v| v.as_entity_ref()).collect(),
            _ => Vec::new(),
        }
    }
}

/// Decoded IFC entity
///
/// Represents a fully decoded IFC entity with its ID, type, and attribute values.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedEntity {
    /// Entity ID
    pub id: EntityId,
    /// Entity type
    pub ifc_type: IfcType,
    /// Attribute values in order
    pub attributes: Vec<AttributeValue>,
}

impl DecodedEntity {
    /// Create a new entity
    pub fn new(id: EntityId, ifc_type: IfcType, attributes: Vec<AttributeValue>) -> Self {
        Self {
            id,
            ifc_type,
            attributes,
        }
    }

    /// Get attribute at index
    pub fn get(&self, index: usize) -> Option<&AttributeValue> {
        self.attributes.get(index)
    }

    /// Get entity reference at index
    pub fn get_ref(&self, index: usize) -> Option<EntityId> {
        self.get(index).and_then(|v| v.as_entity_ref())
    }

    /// Get string at index
    pub fn get_string(&self, index: usize) -> Option<&str> {
        self.get(index).and_then(|v| v.as_string())
    }

    /// Get float at index
    pub fn get_float(&self, index: usize) -> Option<f64> {
        self.get(index).and_then(|v| v.as_float())
    }

    /// Get list at index
    pub fn get_list(&self, index: usize) -> Option<&[AttributeValue]> {
        self.get(index).and_then(|v| v.as_list())
    }

    /// Get entity references at index (single reference or list)
    pub fn get_refs(&self, index: usize) -> Vec<EntityId> {
        self.get(index).map(|v| v.entity_refs()).unwrap_or_default()
    }

    /// Check whether this entity's classification equals or specializes `ancestor`
    pub fn is_a(&self, ancestor: &IfcType) -> bool {
        self.ifc_type.is_a(ancestor)
    }

    /// GlobalId of rooted entities, `None` for resources or when unset
    pub fn global_id(&self) -> Option<&str> {
        if !self.is_a(&IfcType::IfcRoot) {
            return None;
        }
        self.get_string(crate::schema::root::GLOBAL_ID)
            .filter(|gid| !gid.is_empty())
    }
}
