use serde::Deserialize;
use std::path::Path;

use crate::error::DartError;
use crate::model::{FilingMeta, ReportKind};

/// Batch run configuration: one entry per company/period to process.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchConfig {
    pub companies: Vec<CompanyJob>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompanyJob {
    pub company_name: String,
    pub year: String,
    pub report_type: String,
}

impl CompanyJob {
    /// Validated filing identity for this job.
    pub fn meta(&self) -> Result<FilingMeta, DartError> {
        let kind = ReportKind::from_str_loose(&self.report_type)?;
        FilingMeta::new(&self.company_name, &self.year, kind)
    }
}

/// Load a batch config from a JSON file.
pub fn load_batch_config(path: &Path) -> Result<BatchConfig, DartError> {
    let content = std::fs::read_to_string(path).map_err(|e| DartError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_batch_config(&content, path)
}

/// Parse a batch config from a JSON string.
pub fn parse_batch_config(json: &str, source: &Path) -> Result<BatchConfig, DartError> {
    let config: BatchConfig = serde_json::from_str(json).map_err(|e| DartError::ConfigLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_batch_config(&config)?;
    Ok(config)
}

/// Validate every job up front so a batch never fails halfway on a typo.
pub fn validate_batch_config(config: &BatchConfig) -> Result<(), DartError> {
    if config.companies.is_empty() {
        return Err(DartError::ConfigInvalid("companies must not be empty".into()));
    }
    for job in &config.companies {
        job.meta()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn parse(json: &str) -> Result<BatchConfig, DartError> {
        parse_batch_config(json, &PathBuf::from("companies_config.json"))
    }

    #[test]
    fn test_parse_valid_config() {
        let config = parse(
            r#"{
                "companies": [
                    { "company_name": "한솔피엔에스", "year": "2025", "report_type": "반기보고서" },
                    { "company_name": "삼성전자", "year": "2024", "report_type": "사업보고서" }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(config.companies.len(), 2);
        assert_eq!(
            config.companies[0].meta().unwrap().report,
            ReportKind::HalfYear
        );
    }

    #[test]
    fn test_empty_companies_rejected() {
        assert!(parse(r#"{ "companies": [] }"#).is_err());
    }

    #[test]
    fn test_bad_year_rejected() {
        let result = parse(
            r#"{ "companies": [ { "company_name": "삼성전자", "year": "24", "report_type": "사업보고서" } ] }"#,
        );
        assert!(matches!(result, Err(DartError::ConfigInvalid(_))));
    }

    #[test]
    fn test_unknown_report_type_rejected() {
        let result = parse(
            r#"{ "companies": [ { "company_name": "삼성전자", "year": "2024", "report_type": "월간보고서" } ] }"#,
        );
        assert!(matches!(result, Err(DartError::UnknownReportKind(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "companies": [ {{ "company_name": "한솔피엔에스", "year": "2025", "report_type": "반기보고서" }} ] }}"#
        )
        .unwrap();
        let config = load_batch_config(file.path()).unwrap();
        assert_eq!(config.companies.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_batch_config(Path::new("/nonexistent/companies_config.json"));
        assert!(matches!(result, Err(DartError::ConfigLoad { .. })));
    }
}
