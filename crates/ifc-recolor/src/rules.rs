// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Recolor rules and their compiled form
//!
//! A rule scopes an entity type, lists property conditions that must all hold
//! and names the colour to paint. Rules are plain serde data so they travel as
//! JSON; before a run they are compiled once, which parses colours and builds
//! regexes so authoring mistakes surface before the model is touched.

use crate::color::{ColorSpec, Rgb};
use crate::error::{Error, Result};
use caseless::default_case_fold_str;
use ifc_recolor_model::IfcType;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Scope strings that select every product
pub const WILDCARD_SCOPES: [&str; 4] = ["", "*", "All", "Any"];

/// Whether `scope` (after trimming) means "any entity"
pub fn is_wildcard_scope(scope: &str) -> bool {
    WILDCARD_SCOPES.contains(&scope.trim())
}

/// Comparison applied to each property value
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Op {
    #[default]
    Equals,
    Contains,
    /// Unanchored search
    Regex,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseMode {
    Sensitive,
    #[default]
    Insensitive,
}

/// One property test: `pset` is a set-name substring, `key` an exact key
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub pset: String,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub op: Op,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub case: CaseMode,
}

impl Condition {
    pub fn new(
        pset: impl Into<String>,
        key: impl Into<String>,
        op: Op,
        value: impl Into<String>,
    ) -> Self {
        Self {
            pset: pset.into(),
            key: key.into(),
            op,
            value: value.into(),
            case: CaseMode::Insensitive,
        }
    }

    pub fn equals(
        pset: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::new(pset, key, Op::Equals, value)
    }

    pub fn contains(
        pset: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::new(pset, key, Op::Contains, value)
    }

    pub fn regex(
        pset: impl Into<String>,
        key: impl Into<String>,
        pattern: impl Into<String>,
    ) -> Self {
        Self::new(pset, key, Op::Regex, pattern)
    }

    pub fn with_case(mut self, case: CaseMode) -> Self {
        self.case = case;
        self
    }
}

/// Entity scope, conjunctive conditions and target colour
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(default)]
    pub entity: String,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub color: ColorSpec,
}

impl Rule {
    pub fn new(entity: impl Into<String>, color: ColorSpec) -> Self {
        Self {
            entity: entity.into(),
            conditions: Vec::new(),
            color,
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn scope(&self) -> EntityScope {
        EntityScope::parse(&self.entity)
    }

    /// Compile this rule; `index` is its position, used in error messages
    pub fn compile(&self, index: usize) -> Result<CompiledRule> {
        let color = self
            .color
            .parse()
            .map_err(|e| Error::invalid_color(index, e.to_string()))?;

        let conditions = self
            .conditions
            .iter()
            .enumerate()
            .map(|(i, condition)| {
                CompiledCondition::compile(condition)
                    .map_err(|e| Error::malformed_pattern(index, i, e))
            })
            .collect::<Result<Vec<_>>>()?;

        let scope = self.scope();
        if let EntityScope::Type(ifc_type) = &scope {
            if !ifc_type.is_known() {
                log::warn!("Rule {} scopes unknown type {}", index, ifc_type);
            }
        }

        Ok(CompiledRule {
            index,
            scope,
            conditions,
            color,
        })
    }
}

/// Compile every rule, failing on the first bad colour or pattern
pub fn compile_rules(rules: &[Rule]) -> Result<Vec<CompiledRule>> {
    rules
        .iter()
        .enumerate()
        .map(|(i, rule)| rule.compile(i))
        .collect()
}

/// Which entities a rule applies to
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntityScope {
    Any,
    /// The type and its subtypes
    Type(IfcType),
}

impl EntityScope {
    pub fn parse(scope: &str) -> Self {
        if is_wildcard_scope(scope) {
            EntityScope::Any
        } else {
            EntityScope::Type(IfcType::parse(scope))
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, EntityScope::Any)
    }

    pub fn admits(&self, ifc_type: &IfcType) -> bool {
        match self {
            EntityScope::Any => true,
            EntityScope::Type(scope) => ifc_type.is_a(scope),
        }
    }
}

/// Rule ready for evaluation
#[derive(Clone, Debug)]
pub struct CompiledRule {
    /// Position in the rule list
    pub index: usize,
    pub scope: EntityScope,
    pub conditions: Vec<CompiledCondition>,
    pub color: Rgb,
}

#[derive(Clone, Debug)]
enum ValueTest {
    Equals(String),
    Contains(String),
    Regex(Regex),
}

/// Condition with its comparison value folded and pattern compiled
#[derive(Clone, Debug)]
pub struct CompiledCondition {
    pub pset: String,
    pub key: String,
    case: CaseMode,
    test: ValueTest,
}

impl CompiledCondition {
    /// Insensitive conditions fold the value (and regex pattern text) up front
    fn compile(condition: &Condition) -> std::result::Result<Self, regex::Error> {
        let value = fold(&condition.value, condition.case);
        let test = match condition.op {
            Op::Equals => ValueTest::Equals(value),
            Op::Contains => ValueTest::Contains(value),
            Op::Regex => ValueTest::Regex(Regex::new(&value)?),
        };

        Ok(Self {
            pset: condition.pset.clone(),
            key: condition.key.clone(),
            case: condition.case,
            test,
        })
    }

    /// Test one property value
    pub fn test(&self, value: &str) -> bool {
        let value = fold(value, self.case);
        match &self.test {
            ValueTest::Equals(expected) => value == *expected,
            ValueTest::Contains(needle) => value.contains(needle.as_str()),
            ValueTest::Regex(re) => re.is_match(&value),
        }
    }
}

fn fold(text: &str, case: CaseMode) -> String {
    match case {
        CaseMode::Sensitive => text.to_string(),
        CaseMode::Insensitive => default_case_fold_str(text),
    }
}
