use crate::api::HealthReport;
use std::fmt;

pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_SUMMARY: &str = "No summary available";

/// Rendered meeting health analysis. Every field is always filled.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisView {
    pub sentiment: String,
    pub risk_level: String,
    pub summary: String,
}

pub fn analysis_view(report: &HealthReport) -> AnalysisView {
    let summary = report
        .summary
        .clone()
        .filter(|s| !s.trim().is_empty())
        .or_else(|| report.error.clone())
        .unwrap_or_else(|| NO_SUMMARY.to_string());

    AnalysisView {
        sentiment: or_na(&report.sentiment),
        risk_level: or_na(&report.risk_level),
        summary,
    }
}

fn or_na(field: &Option<String>) -> String {
    field
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

impl fmt::Display for AnalysisView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sentiment: {}", self.sentiment)?;
        writeln!(f, "Risk: {}", self.risk_level)?;
        write!(f, "Summary: {}", self.summary)
    }
}
