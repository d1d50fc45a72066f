//! Graph settings.
//!
//! Settings load from JSON and hash deterministically: tolerances are
//! quantized before hashing so the hash does not depend on float formatting.

use serde::{Deserialize, Serialize};

use crate::canonical::{canonical_hash_hex, quantize};
use crate::types::{ActionKind, ResultsMode};

/// Settings error.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Malformed JSON.
    #[error("Invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A value is out of range.
    #[error("Invalid setting {field}: {reason}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}

/// Presentation and assembly settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphSettings {
    /// Near-zero snapping tolerance for axis scaling, all actions but rotation.
    pub default_zero_tolerance: f64,
    /// Near-zero snapping tolerance for rotation.
    pub rotation_zero_tolerance: f64,
    /// Pen weight of ordinary series.
    pub pen_weight: u32,
    /// Pen weight of allowable and capacity lines.
    pub limit_pen_weight: u32,
    /// Include temporary supports in post-erection product reactions.
    pub include_temporary_supports: bool,
    /// Results mode used when the view model does not choose one.
    pub results_mode: ResultsMode,
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            default_zero_tolerance: 1.0e-3,
            rotation_zero_tolerance: 1.0e-7,
            pen_weight: 2,
            limit_pen_weight: 3,
            include_temporary_supports: true,
            results_mode: ResultsMode::Cumulative,
        }
    }
}

#[derive(Serialize)]
struct QuantizedSettings {
    default_zero_tolerance: i64,
    rotation_zero_tolerance: i64,
    pen_weight: u32,
    limit_pen_weight: u32,
    include_temporary_supports: bool,
    results_mode: ResultsMode,
}

impl GraphSettings {
    /// Parse and validate settings. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (field, value) in [
            ("default_zero_tolerance", self.default_zero_tolerance),
            ("rotation_zero_tolerance", self.rotation_zero_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SettingsError::Invalid {
                    field,
                    reason: "must be a finite, non-negative number",
                });
            }
        }
        if self.pen_weight == 0 || self.limit_pen_weight == 0 {
            return Err(SettingsError::Invalid {
                field: "pen_weight",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    /// Near-zero tolerance for an action.
    ///
    /// Only used to scale axes; series data is never snapped.
    pub fn zero_tolerance(&self, action: ActionKind) -> f64 {
        match action {
            ActionKind::Rotation => self.rotation_zero_tolerance,
            _ => self.default_zero_tolerance,
        }
    }

    /// Deterministic hash of the settings.
    pub fn settings_hash(&self) -> Result<String, serde_json::Error> {
        canonical_hash_hex(&QuantizedSettings {
            default_zero_tolerance: quantize(self.default_zero_tolerance),
            rotation_zero_tolerance: quantize(self.rotation_zero_tolerance),
            pen_weight: self.pen_weight,
            limit_pen_weight: self.limit_pen_weight,
            include_temporary_supports: self.include_temporary_supports,
            results_mode: self.results_mode,
        })
    }
}
