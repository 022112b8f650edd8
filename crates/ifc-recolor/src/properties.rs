// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Property set access for single elements

use ifc_recolor_model::{
    schema, AttributeValue, DecodedEntity, EntityId, EntityResolver, IfcType, Relations,
};

/// Reads property values through the IsDefinedBy edges of an element
#[derive(Clone, Copy)]
pub struct PropertyAccessor<'a> {
    resolver: &'a dyn EntityResolver,
    relations: &'a Relations,
}

impl<'a> PropertyAccessor<'a> {
    pub fn new(resolver: &'a dyn EntityResolver, relations: &'a Relations) -> Self {
        Self {
            resolver,
            relations,
        }
    }

    /// Property sets defined on `element` (quantity sets and others are skipped)
    pub fn property_sets(&self, element: EntityId) -> impl Iterator<Item = &'a DecodedEntity> + 'a {
        let resolver = self.resolver;
        let relations: &'a Relations = self.relations;
        relations
            .defined_by(element)
            .iter()
            .filter_map(move |id| resolver.get(*id))
            .filter(|definition| definition.is_a(&IfcType::IfcPropertySet))
    }

    /// Values of `key` in every property set whose name contains `pset_filter`
    ///
    /// The set name match ignores case, the key match does not. Each record
    /// yields its [`value_text`], so an empty or missing value yields `""`.
    /// The iterator borrows the model; calling again starts over.
    pub fn values_for<'s>(
        &self,
        element: EntityId,
        pset_filter: &'s str,
        key: &'s str,
    ) -> impl Iterator<Item = String> + 's
    where
        'a: 's,
    {
        let resolver = self.resolver;
        let filter = pset_filter.to_lowercase();
        self.property_sets(element)
            .filter(move |pset| pset_name(pset).to_lowercase().contains(&filter))
            .flat_map(move |pset| single_values(resolver, pset))
            .filter(move |(name, _)| *name == key)
            .map(|(_, value)| value_text(value))
    }
}

/// Name of a property set, `""` when unset
pub fn pset_name(pset: &DecodedEntity) -> &str {
    pset.get_string(schema::property_set::NAME).unwrap_or("")
}

/// `(key, nominal value)` of every single-value property in `pset`
pub fn single_values<'r>(
    resolver: &'r dyn EntityResolver,
    pset: &'r DecodedEntity,
) -> impl Iterator<Item = (&'r str, Option<&'r AttributeValue>)> + 'r {
    pset.get_refs(schema::property_set::HAS_PROPERTIES)
        .into_iter()
        .filter_map(move |id| resolver.get(id))
        .filter(|prop| prop.is_a(&IfcType::IfcPropertySingleValue))
        .map(|prop| {
            (
                prop.get_string(schema::property::NAME).unwrap_or(""),
                prop.get(schema::property::NOMINAL_VALUE),
            )
        })
}

/// Plain string form of a property value
///
/// Typed wrappers are unwrapped (`IFCLABEL('x')` is `x`), booleans read
/// `True`/`False` and enumerations give their label. Absent and null values
/// are `""`. Floats follow [`float_text`].
pub fn value_text(value: Option<&AttributeValue>) -> String {
    match value {
        None => String::new(),
        Some(value) => format_value(value),
    }
}

fn format_value(value: &AttributeValue) -> String {
    match value {
        AttributeValue::Null | AttributeValue::Derived => String::new(),
        AttributeValue::String(s) => s.clone(),
        AttributeValue::Integer(i) => i.to_string(),
        AttributeValue::Float(f) => float_text(*f),
        AttributeValue::Bool(b) => bool_text(*b),
        AttributeValue::Enum(e) => e.clone(),
        AttributeValue::EntityRef(id) => id.to_string(),
        AttributeValue::TypedValue(name, args) => match args.first() {
            Some(inner) if is_boolean_type(name) => {
                inner.as_bool().map_or_else(|| format_value(inner), bool_text)
            }
            Some(inner) => format_value(inner),
            None => String::new(),
        },
        AttributeValue::List(items) => items
            .iter()
            .map(format_value)
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// Shortest round-trip text of a float in the common `repr` layout
///
/// Whole numbers keep a `.0` (`3.0`). Exponents below -4 or from 16 up use
/// scientific form with a signed, two-digit exponent (`1e-05`, `1.5e+16`).
pub fn float_text(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_string();
    }
    if f.is_infinite() {
        return String::from(if f > 0.0 { "inf" } else { "-inf" });
    }

    let scientific = format!("{:e}", f);
    let (mantissa, exponent) = scientific
        .split_once('e')
        .and_then(|(m, e)| Some((m, e.parse::<i32>().ok()?)))
        .unwrap_or((scientific.as_str(), 0));

    if (-4..16).contains(&exponent) {
        let positional = f.to_string();
        if positional.contains('.') {
            positional
        } else {
            format!("{}.0", positional)
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}

fn is_boolean_type(name: &str) -> bool {
    name.eq_ignore_ascii_case("IFCBOOLEAN") || name.eq_ignore_ascii_case("IFCLOGICAL")
}

fn bool_text(b: bool) -> String {
    String::from(if b { "True" } else { "False" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{label, Fixture};

    #[test]
    fn test_value_text() {
        assert_eq!(value_text(None), "");
        assert_eq!(value_text(Some(&AttributeValue::Null)), "");
        assert_eq!(value_text(Some(&label("Plaster"))), "Plaster");
        assert_eq!(value_text(Some(&AttributeValue::Integer(0))), "0");
        assert_eq!(value_text(Some(&AttributeValue::Float(2.5))), "2.5");
        assert_eq!(
            value_text(Some(&AttributeValue::typed(
                "IFCLENGTHMEASURE",
                AttributeValue::Float(0.1)
            ))),
            "0.1"
        );
        assert_eq!(
            value_text(Some(&AttributeValue::typed(
                "IFCLENGTHMEASURE",
                AttributeValue::Float(3.0)
            ))),
            "3.0"
        );
        assert_eq!(value_text(Some(&AttributeValue::Float(1e-5))), "1e-05");
        assert_eq!(
            value_text(Some(&AttributeValue::typed(
                "IFCBOOLEAN",
                AttributeValue::Enum("T".into())
            ))),
            "True"
        );
        assert_eq!(value_text(Some(&AttributeValue::Bool(false))), "False");
        assert_eq!(
            value_text(Some(&AttributeValue::Enum("NOTDEFINED".into()))),
            "NOTDEFINED"
        );
    }

    #[test]
    fn test_float_text() {
        assert_eq!(float_text(0.0), "0.0");
        assert_eq!(float_text(-0.0), "-0.0");
        assert_eq!(float_text(3.0), "3.0");
        assert_eq!(float_text(-2.0), "-2.0");
        assert_eq!(float_text(0.1), "0.1");
        assert_eq!(float_text(0.0001), "0.0001");
        assert_eq!(float_text(0.00012), "0.00012");
        assert_eq!(float_text(1e-5), "1e-05");
        assert_eq!(float_text(-2.5e-7), "-2.5e-07");
        assert_eq!(float_text(1e15), "1000000000000000.0");
        assert_eq!(float_text(1e16), "1e+16");
        assert_eq!(float_text(1.5e16), "1.5e+16");
        assert_eq!(float_text(1e100), "1e+100");
        assert_eq!(float_text(f64::NAN), "nan");
        assert_eq!(float_text(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn test_values_for_filters_set_name_and_key() {
        let mut fx = Fixture::new();
        let wall = fx.element(IfcType::IfcWall, "W1");
        fx.pset(&[wall], "FinishData", &[("Material", label("Plaster"))]);
        fx.pset(
            &[wall],
            "Pset_WallCommon",
            &[("Material", label("Concrete")), ("material", label("lower"))],
        );
        fx.pset(&[wall], "OtherFinish", &[("Material", AttributeValue::Null)]);
        let model = fx.into_model();
        let relations = Relations::build(&model);
        let accessor = PropertyAccessor::new(&model, &relations);

        let finish: Vec<String> = accessor.values_for(wall, "FINISH", "Material").collect();
        assert_eq!(finish, vec!["Plaster".to_string(), String::new()]);

        let all: Vec<String> = accessor.values_for(wall, "", "Material").collect();
        assert_eq!(all.len(), 3);

        // Restartable
        assert_eq!(accessor.values_for(wall, "common", "Material").count(), 1);
        assert_eq!(accessor.values_for(wall, "common", "Material").count(), 1);

        assert_eq!(accessor.values_for(wall, "Missing", "Material").count(), 0);
    }

    #[test]
    fn test_quantity_sets_are_ignored() {
        let mut fx = Fixture::new();
        let slab = fx.element(IfcType::IfcSlab, "S1");
        let qto = fx.add(
            IfcType::IfcElementQuantity,
            vec![
                AttributeValue::String("q".into()),
                AttributeValue::Null,
                AttributeValue::String("Qto_SlabBaseQuantities".into()),
            ],
        );
        fx.defines_by_properties(&[slab], qto);
        let model = fx.into_model();
        let relations = Relations::build(&model);
        let accessor = PropertyAccessor::new(&model, &relations);

        assert_eq!(accessor.property_sets(slab).count(), 0);
    }
}
