//! Gene Assembly - named set of genetic components under validation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Validation lifecycle of a gene assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    /// Not yet examined.
    #[default]
    Pending,
    /// Validation under way.
    InProgress,
    /// Passed validation.
    Validated,
    /// Failed validation.
    Failed,
}

/// Normalized predicted-performance scores, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PredictedPerformance {
    /// Stress tolerance score.
    pub stress_tolerance: f64,
    /// Growth rate score.
    pub growth_rate: f64,
    /// Yield score.
    #[serde(rename = "yield")]
    pub yield_score: f64,
}

impl PredictedPerformance {
    /// Build a score triple.
    #[must_use]
    pub const fn new(stress_tolerance: f64, growth_rate: f64, yield_score: f64) -> Self {
        Self {
            stress_tolerance,
            growth_rate,
            yield_score,
        }
    }

    /// Whether every score lies in `[0, 1]`.
    #[must_use]
    pub fn is_normalized(&self) -> bool {
        [self.stress_tolerance, self.growth_rate, self.yield_score]
            .iter()
            .all(|v| (0.0..=1.0).contains(v))
    }
}

/// A named set of genetic components with predicted performance.
///
/// Created externally (seed data or callers) and treated as immutable once
/// submitted to a pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneAssembly {
    id: String,
    name: String,
    components: Vec<String>,
    predicted_performance: PredictedPerformance,
    validation_status: ValidationStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl GeneAssembly {
    /// Create an assembly with no components in `Pending` status.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        GeneAssemblyBuilder::new(id, name).build()
    }

    /// Create a builder for an assembly with optional fields.
    #[must_use]
    pub fn builder(id: impl Into<String>, name: impl Into<String>) -> GeneAssemblyBuilder {
        GeneAssemblyBuilder::new(id, name)
    }

    /// Get the assembly ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the assembly name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the genetic component names.
    #[must_use]
    pub fn components(&self) -> &[String] {
        &self.components
    }

    /// Get the predicted performance scores.
    #[must_use]
    pub const fn predicted_performance(&self) -> PredictedPerformance {
        self.predicted_performance
    }

    /// Get the validation status.
    #[must_use]
    pub const fn validation_status(&self) -> ValidationStatus {
        self.validation_status
    }

    /// Get the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Get the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Builder for `GeneAssembly`.
#[derive(Debug)]
pub struct GeneAssemblyBuilder {
    id: String,
    name: String,
    components: Vec<String>,
    predicted_performance: PredictedPerformance,
    validation_status: ValidationStatus,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl GeneAssemblyBuilder {
    /// Create a new builder with required fields.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            components: Vec::new(),
            predicted_performance: PredictedPerformance::default(),
            validation_status: ValidationStatus::Pending,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Set the genetic components.
    #[must_use]
    pub fn components<I, S>(mut self, components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.components = components.into_iter().map(Into::into).collect();
        self
    }

    /// Set the predicted performance scores.
    #[must_use]
    pub const fn predicted_performance(mut self, performance: PredictedPerformance) -> Self {
        self.predicted_performance = performance;
        self
    }

    /// Set the validation status.
    #[must_use]
    pub const fn validation_status(mut self, status: ValidationStatus) -> Self {
        self.validation_status = status;
        self
    }

    /// Set a custom creation timestamp (seed data, deserialization, tests).
    #[must_use]
    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Set a custom update timestamp. Defaults to the creation timestamp.
    #[must_use]
    pub const fn updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    /// Build the `GeneAssembly`.
    #[must_use]
    pub fn build(self) -> GeneAssembly {
        GeneAssembly {
            id: self.id,
            name: self.name,
            components: self.components,
            predicted_performance: self.predicted_performance,
            validation_status: self.validation_status,
            created_at: self.created_at,
            updated_at: self.updated_at.unwrap_or(self.created_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assembly_defaults() {
        let assembly = GeneAssembly::new("a-1", "Test Assembly");
        assert_eq!(assembly.id(), "a-1");
        assert!(assembly.components().is_empty());
        assert_eq!(assembly.validation_status(), ValidationStatus::Pending);
        assert_eq!(assembly.created_at(), assembly.updated_at());
    }

    #[test]
    fn test_yield_serializes_as_keyword() {
        let json = serde_json::to_value(PredictedPerformance::new(0.85, 0.92, 0.88)).unwrap();
        assert_eq!(json["yield"], 0.88);
        assert_eq!(
            serde_json::to_value(ValidationStatus::InProgress).unwrap(),
            "in_progress"
        );
    }

    #[test]
    fn test_performance_normalized() {
        assert!(PredictedPerformance::new(0.0, 1.0, 0.5).is_normalized());
        assert!(!PredictedPerformance::new(1.2, 0.5, 0.5).is_normalized());
    }
}
