//! Serialized regression artifacts and the candidate-path loading policy.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::PredictError;
use crate::model::{DemandModel, FEATURE_SCHEMA, FeatureVector, TemperatureModel};

/// Named-coefficient linear regressor exported by the training pipeline.
///
/// The artifact carries its own feature-name list; prediction binds values
/// to coefficients by name, so a feature-set disagreement is detected rather
/// than silently producing a wrong estimate.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegressionArtifact {
    /// Training-time feature names, one per coefficient.
    pub features: Vec<String>,
    /// Model intercept.
    pub intercept: f64,
    /// Coefficients aligned with `features`.
    pub coefficients: Vec<f64>,
}

impl RegressionArtifact {
    /// Parses an artifact from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns `ModelUnavailable` if the JSON is invalid or the feature and
    /// coefficient lists disagree in length.
    pub fn from_json_str(json: &str) -> Result<Self, PredictError> {
        let artifact: Self = serde_json::from_str(json)
            .map_err(|e| PredictError::ModelUnavailable(format!("invalid artifact JSON: {e}")))?;
        if artifact.features.len() != artifact.coefficients.len() {
            return Err(PredictError::ModelUnavailable(format!(
                "artifact has {} features but {} coefficients",
                artifact.features.len(),
                artifact.coefficients.len()
            )));
        }
        Ok(artifact)
    }

    /// Loads an artifact from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `ModelUnavailable` if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self, PredictError> {
        let json = fs::read_to_string(path).map_err(|e| {
            PredictError::ModelUnavailable(format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_json_str(&json)
            .map_err(|e| PredictError::ModelUnavailable(format!("\"{}\": {e}", path.display())))
    }

    /// Verifies the artifact consumes exactly the canonical feature schema.
    fn check_demand_schema(&self, features: &FeatureVector) -> Result<(), PredictError> {
        let unknown: Vec<&str> = self
            .features
            .iter()
            .map(String::as_str)
            .filter(|name| features.value_of(name).is_none())
            .collect();
        if !unknown.is_empty() {
            return Err(PredictError::SchemaMismatch(format!(
                "model expects unknown feature(s): {}",
                unknown.join(", ")
            )));
        }

        let missing: Vec<&str> = FEATURE_SCHEMA
            .iter()
            .copied()
            .filter(|name| !self.features.iter().any(|f| f == name))
            .collect();
        if !missing.is_empty() {
            return Err(PredictError::SchemaMismatch(format!(
                "model does not consume feature(s): {}",
                missing.join(", ")
            )));
        }

        Ok(())
    }
}

impl DemandModel for RegressionArtifact {
    fn predict(&self, features: &FeatureVector) -> Result<f64, PredictError> {
        self.check_demand_schema(features)?;
        let mut estimate = self.intercept;
        for (name, coefficient) in self.features.iter().zip(&self.coefficients) {
            // check_demand_schema guarantees every name resolves
            let value = features.value_of(name).unwrap_or(0.0);
            estimate += coefficient * value;
        }
        Ok(estimate)
    }
}

/// Temperature regressor over the day-of-year ordinal.
///
/// Wraps a [`RegressionArtifact`] whose schema was verified at construction,
/// making estimation itself infallible.
#[derive(Debug, Clone)]
pub struct DayOfYearModel {
    intercept: f64,
    coefficient: f64,
}

impl DayOfYearModel {
    /// Feature name the temperature artifact must declare.
    pub const FEATURE: &str = "day_of_year";

    /// Validates the artifact's schema and wraps it.
    ///
    /// # Errors
    ///
    /// Returns `ModelUnavailable` if the artifact was trained on anything
    /// other than the single `day_of_year` feature.
    pub fn from_artifact(artifact: RegressionArtifact) -> Result<Self, PredictError> {
        match artifact.features.as_slice() {
            [name] if name == Self::FEATURE => Ok(Self {
                intercept: artifact.intercept,
                coefficient: artifact.coefficients[0],
            }),
            other => Err(PredictError::ModelUnavailable(format!(
                "temperature artifact must use the single feature \"{}\", got [{}]",
                Self::FEATURE,
                other.join(", ")
            ))),
        }
    }
}

impl TemperatureModel for DayOfYearModel {
    fn estimate_tavg(&self, day_of_year: u32) -> f64 {
        self.intercept + self.coefficient * f64::from(day_of_year)
    }
}

/// Ordered list of candidate artifact paths.
///
/// Replaces ad-hoc "try one filename, fall back to another" loading: the
/// preference order is explicit configuration, and the first candidate that
/// loads wins.
#[derive(Debug, Clone)]
pub struct ArtifactPolicy {
    candidates: Vec<PathBuf>,
}

impl ArtifactPolicy {
    /// Creates a policy from candidate paths in preference order.
    pub fn new<I, P>(candidates: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
        }
    }

    /// Candidate paths in preference order.
    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// Loads the first candidate that parses.
    ///
    /// # Errors
    ///
    /// Returns `ModelUnavailable` naming every path tried if no candidate
    /// loads. `what` labels the artifact in logs and error messages.
    pub fn load_required(&self, what: &str) -> Result<RegressionArtifact, PredictError> {
        for path in &self.candidates {
            match RegressionArtifact::from_path(path) {
                Ok(artifact) => {
                    info!(artifact = what, path = %path.display(), "loaded model artifact");
                    return Ok(artifact);
                }
                Err(e) => debug!(artifact = what, "candidate rejected: {e}"),
            }
        }
        let tried: Vec<String> = self
            .candidates
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        Err(PredictError::ModelUnavailable(format!(
            "no {what} artifact could be loaded (tried: {})",
            tried.join(", ")
        )))
    }

    /// Loads the first candidate that parses, or `None` if all fail.
    ///
    /// Failures are logged at debug level; an absent optional artifact is
    /// not an error.
    pub fn load_optional(&self, what: &str) -> Option<RegressionArtifact> {
        match self.load_required(what) {
            Ok(artifact) => Some(artifact),
            Err(e) => {
                debug!("{e}");
                None
            }
        }
    }
}
