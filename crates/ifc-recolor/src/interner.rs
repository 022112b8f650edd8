// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RGB colour deduplication
//!
//! Reuses the first existing `IfcColourRgb` whose channels are all within
//! [`COLOR_EPSILON`](crate::color::COLOR_EPSILON) of the requested colour.
//! Colours that do not exist yet are queued and only written on
//! [`ColorInterner::commit`], so a dry run never inserts anything. Existing
//! colour entities are never changed or removed.

use crate::color::Rgb;
use ifc_recolor_model::{
    schema, AttributeValue, EntityId, EntityResolver, IfcType, Model, Result,
};

/// Outcome of interning one colour
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Interned {
    /// Colour entity already in the model
    Existing(EntityId),
    /// Position in [`ColorInterner::pending`]
    Pending(usize),
}

/// Palette snapshot plus the colours still to be created
#[derive(Clone, Debug)]
pub struct ColorInterner {
    palette: Vec<(EntityId, Rgb)>,
    pending: Vec<Rgb>,
    tag: String,
}

impl ColorInterner {
    /// Snapshot every `IfcColourRgb` in ascending id order
    ///
    /// New colours will be named `tag`.
    pub fn new(resolver: &dyn EntityResolver, tag: impl Into<String>) -> Self {
        let palette = resolver
            .entities_by_type(&IfcType::IfcColourRgb)
            .into_iter()
            .filter_map(|colour| {
                let channel = |i| colour.get_float(i);
                Some((
                    colour.id,
                    Rgb::new(
                        channel(schema::colour_rgb::RED)?,
                        channel(schema::colour_rgb::GREEN)?,
                        channel(schema::colour_rgb::BLUE)?,
                    ),
                ))
            })
            .collect();

        Self {
            palette,
            pending: Vec::new(),
            tag: tag.into(),
        }
    }

    /// Existing colour entity equal to `rgb`, if any
    pub fn lookup(&self, rgb: &Rgb) -> Option<EntityId> {
        self.palette
            .iter()
            .find(|(_, existing)| existing.approx_eq(rgb))
            .map(|(id, _)| *id)
    }

    /// Existing entity, or a queued colour shared by all equal requests
    pub fn intern(&mut self, rgb: Rgb) -> Interned {
        if let Some(id) = self.lookup(&rgb) {
            return Interned::Existing(id);
        }
        if let Some(pos) = self.pending.iter().position(|queued| queued.approx_eq(&rgb)) {
            return Interned::Pending(pos);
        }
        self.pending.push(rgb);
        Interned::Pending(self.pending.len() - 1)
    }

    /// Colours that [`ColorInterner::commit`] would create
    pub fn pending(&self) -> &[Rgb] {
        &self.pending
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Insert the queued colours; the result is indexed like [`Interned::Pending`]
    pub fn commit(self, model: &mut Model) -> Result<Vec<EntityId>> {
        let tag = self.tag;
        self.pending
            .into_iter()
            .map(|rgb| {
                let id = model.add(IfcType::IfcColourRgb, colour_attributes(&tag, rgb))?;
                log::debug!("Created colour {} {}", id, rgb);
                Ok(id)
            })
            .collect()
    }
}

fn colour_attributes(tag: &str, rgb: Rgb) -> Vec<AttributeValue> {
    vec![
        AttributeValue::String(tag.to_string()),
        AttributeValue::Float(rgb.r),
        AttributeValue::Float(rgb.g),
        AttributeValue::Float(rgb.b),
    ]
}

/// Reuse or create the colour entity for `rgb` right away
pub fn intern_color(model: &mut Model, rgb: Rgb, tag: &str) -> Result<EntityId> {
    let interner = ColorInterner::new(&*model, tag);
    if let Some(id) = interner.lookup(&rgb) {
        return Ok(id);
    }
    model.add(IfcType::IfcColourRgb, colour_attributes(tag, rgb))
}
