//! YAML Export functionality
//!
//! Same document as the JSON export, for readers who prefer YAML.

use crate::error::{CashflowError, CashflowResult};
use crate::export::json::ProjectionExport;
use std::io::Write;

/// Export a projection to YAML
pub fn export_projection_yaml<W: Write>(
    export: &ProjectionExport,
    writer: &mut W,
) -> CashflowResult<()> {
    let header = format!(
        "# cashflow-cli projection export\n\
         # Generated: {}\n\
         # App Version: {}\n\
         # Amounts are in cents.\n\n",
        export.generated_at, export.app_version
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| CashflowError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, export).map_err(|e| CashflowError::Export(e.to_string()))?;

    Ok(())
}

/// Read a YAML projection export back and validate it
pub fn import_projection_yaml(yaml_str: &str) -> CashflowResult<ProjectionExport> {
    let export: ProjectionExport =
        serde_yaml::from_str(yaml_str).map_err(|e| CashflowError::Import(e.to_string()))?;

    export.validate().map_err(CashflowError::Import)?;

    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::{project_scenario, ScenarioParameters};
    use crate::models::{BaselineStats, Money, YearMonth};

    #[test]
    fn test_yaml_export() {
        let baseline = BaselineStats::new(
            Money::from_dollars(1000),
            Money::from_dollars(1300),
            Money::from_dollars(1000),
        );
        let params = ScenarioParameters::unchanged(4);
        let projection = project_scenario(baseline, &params).unwrap();
        let start = YearMonth::new(2025, 1).unwrap();
        let export = ProjectionExport::new(&projection, &params, start, None);

        let mut out = Vec::new();
        export_projection_yaml(&export, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("# cashflow-cli projection export"));
        assert!(text.contains("schema_version"));
        assert!(!text.contains("feasibility"));

        let imported = import_projection_yaml(&text).unwrap();
        assert_eq!(imported.months.len(), 4);
        assert_eq!(imported.months[3].point.cumulative_savings, Money::from_dollars(-200));
    }

    #[test]
    fn test_yaml_import_rejects_garbage() {
        assert!(import_projection_yaml("schema_version: [").is_err());
    }
}
