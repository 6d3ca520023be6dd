// SPDX-FileCopyrightText: 2026 Lexaid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the service trait, the HTTP client and the workflow controller.
//!
//! Field names follow the service's JSON contract (snake_case), so these types
//! serialize and deserialize directly on the wire.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};

/// Opaque identifier assigned by the legal service.
///
/// The service may use JSON numbers or strings. The wire shape is kept so
/// the identifier is echoed back exactly as it was received.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    Number(i64),
    Text(String),
}

impl Identifier {
    /// Parses user input: all-digit strings become numbers, anything else is text.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        match trimmed.parse::<i64>() {
            Ok(n) => Identifier::Number(n),
            Err(_) => Identifier::Text(trimmed.to_string()),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Number(n) => write!(f, "{n}"),
            Identifier::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Identifier {
    fn from(n: i64) -> Self {
        Identifier::Number(n)
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Identifier::Text(s.to_string())
    }
}

impl From<String> for Identifier {
    fn from(s: String) -> Self {
        Identifier::Text(s)
    }
}

impl PartialEq<&str> for Identifier {
    fn eq(&self, other: &&str) -> bool {
        match self {
            Identifier::Text(s) => s == other,
            Identifier::Number(n) => n.to_string() == *other,
        }
    }
}

/// How urgent the user considers the issue.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Urgency {
    Low,
    #[default]
    Medium,
    High,
}

/// Kind of document the service renders from a template.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DocumentType {
    #[default]
    DemandLetter,
    ComplaintLetter,
    Notice,
    Response,
    Petition,
}

/// The four stage operations of the intake workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    SubmitIssue,
    RequestAdvice,
    GenerateDocument,
}

/// Views a presentation layer can show for a case.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum View {
    #[default]
    Submit,
    Analysis,
    Advice,
    Documents,
    Resources,
}

impl View {
    /// All views in display order.
    pub const ALL: [View; 5] = [
        View::Submit,
        View::Analysis,
        View::Advice,
        View::Documents,
        View::Resources,
    ];
}

/// Health status reported by the legal service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Service is fully operational.
    Healthy,
    /// Service answers but reports a problem (database or model unavailable).
    Degraded(String),
    /// Service is not reachable or not operational.
    Unhealthy(String),
}

/// User-authored description of a legal problem.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueSubmission {
    pub description: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub urgency: Urgency,
}

impl IssueSubmission {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    /// Sets the location. Blank input clears it.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = non_blank(location.into());
        self
    }

    /// Sets the contact email. Blank input clears it.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = non_blank(email.into());
        self
    }

    pub fn with_urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = urgency;
        self
    }

    /// True when the description is empty after trimming whitespace.
    pub fn is_blank(&self) -> bool {
        self.description.trim().is_empty()
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Categorization returned by the analyze call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub category: String,
    pub confidence: f64,
    pub estimated_complexity: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub suggested_actions: Vec<String>,
}

impl AnalysisResult {
    /// Human-readable category, e.g. `tenant_rights` -> `tenant rights`.
    pub fn category_label(&self) -> String {
        self.category.replace('_', " ")
    }

    /// Confidence as a whole percentage.
    pub fn confidence_percent(&self) -> u8 {
        (self.confidence.clamp(0.0, 1.0) * 100.0).round() as u8
    }
}

/// Successful analyze response: the new case id plus its analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeOutcome {
    pub issue_id: Identifier,
    #[serde(flatten)]
    pub analysis: AnalysisResult,
}

/// Detailed guidance returned by the advice call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceResult {
    pub advice: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub next_steps: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub relevant_laws: Vec<String>,
}

/// Body of the generate call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRequest {
    pub issue_id: Identifier,
    pub template_id: Identifier,
    pub document_type: DocumentType,
}

/// Descriptor of a document the service rendered for a case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedDocument {
    pub id: Identifier,
    pub file_name: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub generated_at: DateTime<Utc>,
    /// Path or URL, resolved against the service base URL before fetching.
    pub download_url: String,
    #[serde(default)]
    pub template_id: Option<Identifier>,
    #[serde(default)]
    pub document_type: Option<String>,
}

/// A document template offered by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentTemplate {
    pub id: Identifier,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub required_fields: Vec<String>,
}

/// An aid organization from the resource directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceEntry {
    pub id: Identifier,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub categories: Vec<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub organization_type: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub jurisdiction: Option<String>,
}

impl ResourceEntry {
    /// Case-insensitive membership test on the resource's categories.
    pub fn serves_category(&self, category: &str) -> bool {
        self.categories
            .iter()
            .any(|c| c.eq_ignore_ascii_case(category.trim()))
    }
}

/// Treats an explicit JSON `null` list the same as a missing one.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts RFC 3339 timestamps and naive ISO-8601 timestamps (read as UTC).
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp `{raw}`")))
}

/// Parses a service timestamp. Naive timestamps carry no offset and are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}
