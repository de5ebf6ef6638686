//! JSON Export functionality
//!
//! Serializes a projection, its inputs and the optional goal verdict with
//! schema versioning, so an exported scenario can be read back and checked.

use crate::error::{CashflowError, CashflowResult};
use crate::forecast::{FeasibilityResult, Projection, ProjectionPoint, ScenarioParameters};
use crate::models::{BaselineStats, YearMonth};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// One projected month with its calendar label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectedMonth {
    pub month: YearMonth,
    #[serde(flatten)]
    pub point: ProjectionPoint,
}

/// A projection together with the inputs that produced it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub generated_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Baseline statistics the projection starts from
    pub baseline: BaselineStats,

    /// Scenario adjustments and horizon
    pub parameters: ScenarioParameters,

    /// Month before the first projected month
    pub start_month: YearMonth,

    /// Projected months, in order
    pub months: Vec<ProjectedMonth>,

    /// Goal verdict, when the scenario carried a goal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feasibility: Option<FeasibilityResult>,
}

impl ProjectionExport {
    /// Build an export from a projection
    pub fn new(
        projection: &Projection,
        parameters: &ScenarioParameters,
        start_month: YearMonth,
        feasibility: Option<FeasibilityResult>,
    ) -> Self {
        let months = projection
            .iter()
            .map(|point| ProjectedMonth {
                month: start_month.plus_months(point.month_index),
                point,
            })
            .collect();

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            baseline: *projection.baseline(),
            parameters: *parameters,
            start_month,
            months,
            feasibility,
        }
    }

    /// Validate the export structure
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        if self.months.len() != self.parameters.horizon_months as usize {
            return Err(format!(
                "Expected {} projected months, found {}",
                self.parameters.horizon_months,
                self.months.len()
            ));
        }

        let mut previous = self.baseline.current_savings;
        for (expected, entry) in (1u32..).zip(&self.months) {
            if entry.point.month_index != expected {
                return Err(format!(
                    "Month index {} out of sequence (expected {})",
                    entry.point.month_index, expected
                ));
            }
            if entry.month != self.start_month.plus_months(expected) {
                return Err(format!("Month {} has the wrong label {}", expected, entry.month));
            }
            let carried = previous.checked_add(entry.point.projected_net);
            if carried != Some(entry.point.cumulative_savings) {
                return Err(format!("Cumulative savings do not add up at month {}", expected));
            }
            previous = entry.point.cumulative_savings;
        }

        Ok(())
    }
}

/// Export a projection to JSON
pub fn export_projection_json<W: Write>(
    export: &ProjectionExport,
    writer: &mut W,
    pretty: bool,
) -> CashflowResult<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, export)
    } else {
        serde_json::to_writer(writer, export)
    }
    .map_err(|e| CashflowError::Export(e.to_string()))?;

    Ok(())
}

/// Read a JSON projection export back and validate it
pub fn import_projection_json(json_str: &str) -> CashflowResult<ProjectionExport> {
    let export: ProjectionExport =
        serde_json::from_str(json_str).map_err(|e| CashflowError::Import(e.to_string()))?;

    export.validate().map_err(CashflowError::Import)?;

    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::{plan_goal, project_scenario, SavingsGoal};
    use crate::models::Money;

    fn sample() -> ProjectionExport {
        let baseline = BaselineStats::new(
            Money::from_dollars(1200),
            Money::from_dollars(900),
            Money::from_dollars(300),
        );
        let params = ScenarioParameters::unchanged(3)
            .with_goal(SavingsGoal::new(Money::from_dollars(2000), 3).unwrap());
        let projection = project_scenario(baseline, &params).unwrap();
        let plan = plan_goal(baseline, &params).unwrap();
        ProjectionExport::new(
            &projection,
            &params,
            YearMonth::new(2025, 11).unwrap(),
            Some(plan.feasibility),
        )
    }

    #[test]
    fn test_export_labels_months() {
        let export = sample();
        assert_eq!(export.months.len(), 3);
        assert_eq!(export.months[0].month.to_string(), "2025-12");
        assert_eq!(export.months[2].month.to_string(), "2026-02");
        assert!(export.validate().is_ok());
    }

    #[test]
    fn test_json_round_trip() {
        let export = sample();
        let mut out = Vec::new();
        export_projection_json(&export, &mut out, true).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\"schema_version\": \"1.0.0\""));
        assert!(text.contains("\"month\": \"2025-12\""));
        assert!(text.contains("\"cumulative_savings\": 60000"));

        let imported = import_projection_json(&text).unwrap();
        assert_eq!(imported.months, export.months);
        assert_eq!(imported.feasibility, export.feasibility);
    }

    #[test]
    fn test_import_rejects_schema_mismatch() {
        let mut export = sample();
        export.schema_version = "0.1.0".into();
        let text = serde_json::to_string(&export).unwrap();
        assert!(import_projection_json(&text).is_err());
    }

    #[test]
    fn test_validate_detects_tampering() {
        let mut export = sample();
        export.months[1].point.cumulative_savings += Money::from_cents(1);
        assert!(export.validate().unwrap_err().contains("month 2"));
    }
}
