// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON form of a rule list
//!
//! Editors may decorate rules and conditions with private bookkeeping fields
//! whose names start with `_` (row ids and the like). Those never leave or
//! enter the library: they are stripped on export and dropped on import.

use crate::error::Result;
use crate::rules::Rule;
use serde_json::Value;

/// Marker prefix of private fields
pub const PRIVATE_PREFIX: char = '_';

/// Parse a JSON rule list, ignoring private fields
pub fn rules_from_json(json: &str) -> Result<Vec<Rule>> {
    let value: Value = serde_json::from_str(json)?;
    let rules = serde_json::from_value(strip_private(value))?;
    Ok(rules)
}

/// Render rules as pretty-printed JSON without private fields
pub fn rules_to_json(rules: &[Rule]) -> Result<String> {
    let value = strip_private(serde_json::to_value(rules)?);
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Remove every object member whose name starts with `_`, at any depth
pub fn strip_private(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(name, _)| !name.starts_with(PRIVATE_PREFIX))
                .map(|(name, value)| (name, strip_private(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(strip_private).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorSpec;
    use crate::rules::{CaseMode, Condition, Op};
    use serde_json::json;

    #[test]
    fn test_import_ignores_private_fields() {
        let json = r##"[
            {
                "_id": "r_1",
                "entity": "IfcWall",
                "conditions": [
                    {
                        "_id": "c_1",
                        "pset": "Finish",
                        "key": "Material",
                        "op": "equals",
                        "value": "Plaster",
                        "case": "insensitive"
                    }
                ],
                "color": {"hex": "#FF0000"}
            },
            {"entity": "*", "color": {"rgb": [0.0, 0.5, 1.0]}}
        ]"##;

        let rules = rules_from_json(json).unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].entity, "IfcWall");
        assert_eq!(
            rules[0].conditions,
            vec![Condition::equals("Finish", "Material", "Plaster")]
        );
        assert_eq!(rules[0].color, ColorSpec::hex("#FF0000"));
        assert!(rules[1].conditions.is_empty());
        assert_eq!(rules[1].color, ColorSpec::rgb(0.0, 0.5, 1.0));
    }

    #[test]
    fn test_export_shape() {
        let rules = vec![Rule::new("IfcSlab", ColorSpec::hex("#00FF00")).with_condition(
            Condition::new("Pset", "Ref", Op::Regex, "^A").with_case(CaseMode::Sensitive),
        )];
        let exported: Value = serde_json::from_str(&rules_to_json(&rules).unwrap()).unwrap();
        assert_eq!(
            exported,
            json!([{
                "entity": "IfcSlab",
                "conditions": [
                    {
                        "pset": "Pset",
                        "key": "Ref",
                        "op": "regex",
                        "value": "^A",
                        "case": "sensitive"
                    }
                ],
                "color": {"hex": "#00FF00"}
            }])
        );
    }

    #[test]
    fn test_strip_private_is_recursive() {
        let stripped = strip_private(json!({"_a": 1, "b": [{"_c": 2, "d": 3}], "e": "_kept"}));
        assert_eq!(stripped, json!({"b": [{"d": 3}], "e": "_kept"}));
    }

    #[test]
    fn test_unknown_operator_is_rejected() {
        let json = r##"[{
            "entity": "*",
            "conditions": [{"op": "greater"}],
            "color": {"hex": "#000000"}
        }]"##;
        assert!(matches!(
            rules_from_json(json),
            Err(crate::error::Error::Json(_))
        ));
    }
}
