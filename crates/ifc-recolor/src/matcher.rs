// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rule evaluation against single elements

use crate::properties::PropertyAccessor;
use crate::rules::{CompiledCondition, CompiledRule};
use ifc_recolor_model::{DecodedEntity, EntityResolver, Relations};

/// Evaluates compiled rules on elements of one model
#[derive(Clone, Copy)]
pub struct RuleMatcher<'a> {
    accessor: PropertyAccessor<'a>,
}

impl<'a> RuleMatcher<'a> {
    pub fn new(resolver: &'a dyn EntityResolver, relations: &'a Relations) -> Self {
        Self {
            accessor: PropertyAccessor::new(resolver, relations),
        }
    }

    /// Scope check, then every condition must hold
    ///
    /// A condition holds when any value found under its (pset, key) passes
    /// the test; no value at all fails it. No conditions means the scope
    /// alone decides.
    pub fn matches(&self, element: &DecodedEntity, rule: &CompiledRule) -> bool {
        if !rule.scope.admits(&element.ifc_type) {
            return false;
        }
        rule.conditions
            .iter()
            .all(|condition| self.condition_holds(element, condition))
    }

    /// First rule in list order that matches `element`
    pub fn first_match<'r>(
        &self,
        element: &DecodedEntity,
        rules: &'r [CompiledRule],
    ) -> Option<&'r CompiledRule> {
        rules.iter().find(|rule| self.matches(element, rule))
    }

    fn condition_holds(&self, element: &DecodedEntity, condition: &CompiledCondition) -> bool {
        self.accessor
            .values_for(element.id, &condition.pset, &condition.key)
            .any(|value| condition.test(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorSpec;
    use crate::rules::{compile_rules, Condition, Rule};
    use crate::test_utils::{label, Fixture};
    use ifc_recolor_model::{AttributeValue, EntityResolver, IfcType, Model};

    fn check(model: &Model, element: ifc_recolor_model::EntityId, rule: Rule) -> bool {
        let relations = Relations::build(model);
        let matcher = RuleMatcher::new(model, &relations);
        let compiled = rule.compile(0).unwrap();
        matcher.matches(model.get(element).unwrap(), &compiled)
    }

    fn red() -> ColorSpec {
        ColorSpec::hex("#FF0000")
    }

    #[test]
    fn test_scope_alone() {
        let mut fx = Fixture::new();
        let wall = fx.element(IfcType::IfcWallStandardCase, "W");
        let model = fx.into_model();

        assert!(check(&model, wall, Rule::new("IfcWall", red())));
        assert!(check(&model, wall, Rule::new("IFCWALLSTANDARDCASE", red())));
        assert!(check(&model, wall, Rule::new("*", red())));
        assert!(!check(&model, wall, Rule::new("IfcSlab", red())));
        assert!(!check(&model, wall, Rule::new("IfcWidget", red())));
    }

    #[test]
    fn test_conditions_are_conjunctive() {
        let mut fx = Fixture::new();
        let wall = fx.element(IfcType::IfcWall, "W");
        fx.pset(
            &[wall],
            "FinishData",
            &[("Material", label("plaster")), ("Side", label("North-East Facade"))],
        );
        let model = fx.into_model();

        let both = Rule::new("IfcWall", red())
            .with_condition(Condition::equals("Finish", "Material", "Plaster"))
            .with_condition(Condition::contains("finish", "Side", "east"));
        assert!(check(&model, wall, both.clone()));

        let one_false = both.with_condition(Condition::equals("Finish", "Material", "Brick"));
        assert!(!check(&model, wall, one_false));
    }

    #[test]
    fn test_absent_property_fails_but_null_is_empty() {
        let mut fx = Fixture::new();
        let wall = fx.element(IfcType::IfcWall, "W");
        fx.pset(&[wall], "Data", &[("Empty", AttributeValue::Null)]);
        let model = fx.into_model();

        let on_missing_key =
            Rule::new("*", red()).with_condition(Condition::equals("Data", "Missing", ""));
        assert!(!check(&model, wall, on_missing_key));

        let on_null = Rule::new("*", red()).with_condition(Condition::equals("Data", "Empty", ""));
        assert!(check(&model, wall, on_null));
    }

    #[test]
    fn test_any_value_satisfies() {
        let mut fx = Fixture::new();
        let wall = fx.element(IfcType::IfcWall, "W");
        fx.pset(&[wall], "Pset_A", &[("Ref", label("B7"))]);
        fx.pset(&[wall], "Pset_B", &[("Ref", label("A12"))]);
        let model = fx.into_model();

        let rule = Rule::new("IfcWall", red())
            .with_condition(Condition::regex("Pset", "Ref", r"^A\d+$"));
        assert!(check(&model, wall, rule));
    }

    #[test]
    fn test_first_match() {
        let mut fx = Fixture::new();
        let wall = fx.element(IfcType::IfcWall, "W");
        let model = fx.into_model();
        let relations = Relations::build(&model);
        let matcher = RuleMatcher::new(&model, &relations);

        let rules = compile_rules(&[
            Rule::new("IfcSlab", red()),
            Rule::new("IfcWall", ColorSpec::hex("#00FF00")),
            Rule::new("*", ColorSpec::hex("#0000FF")),
        ])
        .unwrap();
        let hit = matcher.first_match(model.get(wall).unwrap(), &rules).unwrap();
        assert_eq!(hit.index, 1);
    }
}
