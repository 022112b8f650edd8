// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Recolor runs
//!
//! A run happens in two steps. [`RecolorEngine::plan`] only reads the model:
//! it compiles the rules, selects targets, finds the first matching rule of
//! each target, interns its colour and lists every colorable style to
//! rewrite. [`RecolorPlan::apply`] then creates the queued colours and points
//! each listed style at its colour. A dry run is a plan that is never applied,
//! so it cannot change the model.

use crate::color::Rgb;
use crate::error::{Error, Result};
use crate::interner::{ColorInterner, Interned};
use crate::matcher::RuleMatcher;
use crate::rules::{compile_rules, CompiledRule, EntityScope, Rule};
use crate::styles::{StylePath, StyleResolver};
use ifc_recolor_model::{
    schema, AttributeValue, DecodedEntity, EntityId, EntityResolver, IfcType, Model, Relations,
};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Name given to colour entities created by a run
pub const DEFAULT_COLOR_TAG: &str = "LL-Recolor";

/// Run configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecolorOptions {
    /// Count only, never write
    pub dry_run: bool,
    /// Follow materials of type objects too
    pub include_type_level: bool,
    /// Count and write a style once per element even when reached on several paths
    pub dedupe_styles: bool,
    /// Name of created colour entities
    pub color_tag: String,
}

impl Default for RecolorOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            include_type_level: true,
            dedupe_styles: false,
            color_tag: DEFAULT_COLOR_TAG.to_string(),
        }
    }
}

impl RecolorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    pub fn with_type_level(mut self, enabled: bool) -> Self {
        self.include_type_level = enabled;
        self
    }

    pub fn with_dedupe_styles(mut self, enabled: bool) -> Self {
        self.dedupe_styles = enabled;
        self
    }

    pub fn with_color_tag(mut self, tag: impl Into<String>) -> Self {
        self.color_tag = tag.into();
        self
    }
}

/// Outcome counters of a run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecolorStats {
    /// Style rewrites, one per (element, path, style) hit
    pub changed_styles: usize,
    /// Distinct GlobalIds of elements with at least one rewrite
    pub touched_elements: usize,
}

/// One planned SurfaceColour rewrite
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyleWrite {
    pub element: EntityId,
    pub style: EntityId,
    pub path: StylePath,
    /// Index of the rule that matched the element
    pub rule: usize,
    pub color: Interned,
}

/// Result of the read-only phase of a run
#[derive(Clone, Debug)]
pub struct RecolorPlan {
    writes: Vec<StyleWrite>,
    interner: ColorInterner,
    stats: RecolorStats,
    revision: u64,
}

impl RecolorPlan {
    pub fn stats(&self) -> RecolorStats {
        self.stats
    }

    pub fn writes(&self) -> &[StyleWrite] {
        &self.writes
    }

    /// Colours that applying would create
    pub fn new_colors(&self) -> &[Rgb] {
        self.interner.pending()
    }

    /// Create queued colours and rewrite the planned styles
    ///
    /// Fails without writing if `model` changed since planning.
    pub fn apply(self, model: &mut Model) -> Result<RecolorStats> {
        if model.revision() != self.revision {
            return Err(Error::StalePlan {
                planned: self.revision,
                current: model.revision(),
            });
        }

        let created = self.interner.commit(model)?;
        for write in &self.writes {
            let colour = match write.color {
                Interned::Existing(id) => id,
                Interned::Pending(pos) => created[pos],
            };
            model.set_attribute(
                write.style,
                schema::shading::SURFACE_COLOUR,
                AttributeValue::EntityRef(colour),
            )?;
        }

        log::info!(
            "Applied {} style changes on {} elements, created {} colours",
            self.stats.changed_styles,
            self.stats.touched_elements,
            created.len()
        );
        Ok(self.stats)
    }
}

/// Identity used to deduplicate target elements
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum ElementKey<'m> {
    Global(&'m str),
    Local(EntityId),
}

fn element_key(element: &DecodedEntity) -> ElementKey<'_> {
    match element.global_id() {
        Some(gid) => ElementKey::Global(gid),
        None => ElementKey::Local(element.id),
    }
}

/// Elements a rule list can apply to
///
/// With any wildcard rule this is every product. Otherwise it is the union of
/// each distinct scope's elements in rule order, deduplicated by GlobalId
/// (entity id when there is none).
pub fn select_targets<'m>(
    resolver: &'m dyn EntityResolver,
    rules: &[Rule],
) -> Vec<&'m DecodedEntity> {
    let scopes: Vec<EntityScope> = rules.iter().map(Rule::scope).collect();
    targets_for_scopes(resolver, &scopes)
}

fn targets_for_scopes<'m>(
    resolver: &'m dyn EntityResolver,
    scopes: &[EntityScope],
) -> Vec<&'m DecodedEntity> {
    if scopes.iter().any(EntityScope::is_wildcard) {
        return resolver.entities_by_type(&IfcType::IfcProduct);
    }

    let mut visited: Vec<&IfcType> = Vec::new();
    let mut seen = FxHashSet::default();
    let mut targets = Vec::new();

    for scope in scopes {
        let EntityScope::Type(ifc_type) = scope else {
            continue;
        };
        if visited.contains(&ifc_type) {
            continue;
        }
        visited.push(ifc_type);

        let elements = resolver.entities_by_type(ifc_type);
        if elements.is_empty() {
            log::debug!("No {} elements in model", ifc_type.name());
        }
        for element in elements {
            if seen.insert(element_key(element)) {
                targets.push(element);
            }
        }
    }

    targets
}

/// Rule-driven style recolouring
#[derive(Clone, Debug, Default)]
pub struct RecolorEngine {
    options: RecolorOptions,
}

impl RecolorEngine {
    pub fn new(options: RecolorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RecolorOptions {
        &self.options
    }

    /// Read-only phase
    ///
    /// Rule errors (bad colour, bad pattern) are reported here, before any
    /// write.
    pub fn plan(&self, model: &Model, rules: &[Rule]) -> Result<RecolorPlan> {
        let compiled = compile_rules(rules)?;
        let relations = Relations::build(model);
        let matcher = RuleMatcher::new(model, &relations);
        let resolver = StyleResolver::new(model, &relations);
        let mut interner = ColorInterner::new(model, self.options.color_tag.clone());

        let scopes: Vec<EntityScope> = compiled.iter().map(|rule| rule.scope.clone()).collect();
        let targets = targets_for_scopes(model, &scopes);
        log::debug!("{} rules, {} target elements", compiled.len(), targets.len());

        let mut writes = Vec::new();
        let mut touched = FxHashSet::default();

        for element in targets {
            let Some(rule) = matcher.first_match(element, &compiled) else {
                continue;
            };
            let color = interner.intern(rule.color);
            log::debug!(
                "{} ({}) matches rule {} -> {}",
                element.id,
                element.ifc_type.name(),
                rule.index,
                rule.color
            );

            let before = writes.len();
            self.plan_element(element, rule, color, &resolver, &mut writes);
            // Only elements with a GlobalId count as touched
            if let Some(gid) = element.global_id().filter(|_| writes.len() > before) {
                touched.insert(gid);
            }
        }

        let stats = RecolorStats {
            changed_styles: writes.len(),
            touched_elements: touched.len(),
        };
        log::info!(
            "Planned {} style changes on {} elements ({} new colours)",
            stats.changed_styles,
            stats.touched_elements,
            interner.pending().len()
        );

        Ok(RecolorPlan {
            writes,
            interner,
            stats,
            revision: model.revision(),
        })
    }

    fn plan_element(
        &self,
        element: &DecodedEntity,
        rule: &CompiledRule,
        color: Interned,
        resolver: &StyleResolver<'_>,
        writes: &mut Vec<StyleWrite>,
    ) {
        let mut styles = resolver.styles_for(element, self.options.include_type_level);
        if self.options.dedupe_styles {
            let mut seen = FxHashSet::default();
            styles.retain(|style| seen.insert(style.style));
        }

        for style in styles.into_iter().filter(|style| style.colorable) {
            log::trace!("{}: rewrite {} via {:?}", element.id, style.style, style.path);
            writes.push(StyleWrite {
                element: element.id,
                style: style.style,
                path: style.path,
                rule: rule.index,
                color,
            });
        }
    }

    /// Plan and, unless `dry_run` is set, apply
    pub fn run(&self, model: &mut Model, rules: &[Rule]) -> Result<RecolorStats> {
        let plan = self.plan(model, rules)?;
        if self.options.dry_run {
            return Ok(plan.stats());
        }
        plan.apply(model)
    }

    /// Statistics of a run without touching the model
    pub fn dry_run(&self, model: &Model, rules: &[Rule]) -> Result<RecolorStats> {
        Ok(self.plan(model, rules)?.stats())
    }
}

/// Recolor with default options
pub fn recolor(model: &mut Model, rules: &[Rule], dry_run: bool) -> Result<RecolorStats> {
    RecolorEngine::new(RecolorOptions::default().with_dry_run(dry_run)).run(model, rules)
}
