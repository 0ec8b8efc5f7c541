#![warn(missing_docs)]
//! Pairbench Report - Report Document and Renderers
//!
//! One [`Report`] per `bench` invocation, rendered as:
//! - JSON (machine-readable, also the artifact format)
//! - Table (tab-separated, one row per measured variant)

mod json;
mod report;
mod table;

pub use json::generate_json_report;
pub use report::{
    CorrectnessFailure, EnvInfo, FailureKind, Report, ResultRecord, RunConfig, TargetInfo,
};
pub use table::{TABLE_HEADER, generate_table_report};

use serde::{Deserialize, Serialize};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated summary rows
    #[default]
    Table,
    /// Pretty-printed report document
    Json,
}

impl OutputFormat {
    /// Render `report` in this format
    pub fn render(self, report: &Report) -> Result<String, serde_json::Error> {
        match self {
            OutputFormat::Table => Ok(generate_table_report(report)),
            OutputFormat::Json => generate_json_report(report),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "tsv" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!("table".parse(), Ok(OutputFormat::Table));
        assert_eq!("JSON".parse(), Ok(OutputFormat::Json));
        assert!("html".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::default().to_string(), "table");
    }
}
