// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for rule compilation and recolor runs

use ifc_recolor_model::ModelError;
use thiserror::Error;

/// Recolor result type
pub type Result<T> = std::result::Result<T, Error>;

/// Recolor errors
///
/// Rule authoring mistakes (bad colour, bad pattern) fail the whole run before
/// the model is touched. Missing data on individual elements is never an error.
#[derive(Error, Debug)]
pub enum Error {
    /// Colour specification is missing, ambiguous or malformed
    #[error("Rule {rule}: invalid color: {reason}")]
    InvalidColorSpec { rule: usize, reason: String },

    /// Regex condition does not compile
    #[error("Rule {rule}, condition {condition}: malformed pattern")]
    MalformedPattern {
        rule: usize,
        condition: usize,
        #[source]
        source: regex::Error,
    },

    /// The model changed between planning and applying
    #[error("Plan was made at model revision {planned}, model is now at {current}")]
    StalePlan { planned: u64, current: u64 },

    /// Writing to the entity graph failed
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Rule interchange JSON could not be read or written
    #[error("Rule JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid color spec error
    pub fn invalid_color(rule: usize, reason: impl Into<String>) -> Self {
        Error::InvalidColorSpec {
            rule,
            reason: reason.into(),
        }
    }

    /// Create a malformed pattern error
    pub fn malformed_pattern(rule: usize, condition: usize, source: regex::Error) -> Self {
        Error::MalformedPattern {
            rule,
            condition,
            source,
        }
    }
}
