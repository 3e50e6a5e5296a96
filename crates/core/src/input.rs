//! Snapshot input vocabulary.
//!
//! Each categorical answer is an enum with an `Other` arm. Values outside
//! the known vocabulary are accepted, kept verbatim, and score with the
//! fallback weight of their dimension.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Headcount band of the organization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CompanySize {
    /// "1–50"
    Small,
    /// "51–200"
    Mid,
    /// "201+"
    Large,
    Other(String),
}

impl CompanySize {
    pub const SMALL: &'static str = "1–50";
    pub const MID: &'static str = "51–200";
    pub const LARGE: &'static str = "201+";

    pub fn as_str(&self) -> &str {
        match self {
            Self::Small => Self::SMALL,
            Self::Mid => Self::MID,
            Self::Large => Self::LARGE,
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for CompanySize {
    fn from(s: &str) -> Self {
        match s {
            Self::SMALL => Self::Small,
            Self::MID => Self::Mid,
            Self::LARGE => Self::Large,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Whether the organization already tracks sustainability metrics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TrackMetrics {
    Yes,
    Somewhat,
    No,
    Other(String),
}

impl TrackMetrics {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Yes => "Yes",
            Self::Somewhat => "Somewhat",
            Self::No => "No",
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for TrackMetrics {
    fn from(s: &str) -> Self {
        match s {
            "Yes" => Self::Yes,
            "Somewhat" => Self::Somewhat,
            "No" => Self::No,
            other => Self::Other(other.to_string()),
        }
    }
}

/// The organization's main sustainability challenge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Challenge {
    DataCollection,
    ComplianceReporting,
    CostOperations,
    GovernanceOwnership,
    TargetsStrategy,
    Other(String),
}

impl Challenge {
    pub fn as_str(&self) -> &str {
        match self {
            Self::DataCollection => "Data collection",
            Self::ComplianceReporting => "Compliance / reporting",
            Self::CostOperations => "Cost / operations",
            Self::GovernanceOwnership => "Governance / ownership",
            Self::TargetsStrategy => "Targets / strategy",
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for Challenge {
    fn from(s: &str) -> Self {
        match s {
            "Data collection" => Self::DataCollection,
            "Compliance / reporting" => Self::ComplianceReporting,
            "Cost / operations" => Self::CostOperations,
            "Governance / ownership" => Self::GovernanceOwnership,
            "Targets / strategy" => Self::TargetsStrategy,
            other => Self::Other(other.to_string()),
        }
    }
}

macro_rules! string_conversions {
    ($($ty:ty),*) => {$(
        impl From<String> for $ty {
            fn from(s: String) -> Self {
                Self::from(s.as_str())
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.as_str().to_string()
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    )*};
}

string_conversions!(CompanySize, TrackMetrics, Challenge);

/// The four answers of one assessment, in backend vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    pub company_size: CompanySize,
    pub track_metrics: TrackMetrics,
    pub challenge: Challenge,
}

impl SnapshotInput {
    /// Build an input from raw labels.
    pub fn new(
        industry: Option<&str>,
        company_size: &str,
        track_metrics: &str,
        challenge: &str,
    ) -> Self {
        Self {
            industry: industry.map(str::to_string),
            company_size: company_size.into(),
            track_metrics: track_metrics.into(),
            challenge: challenge.into(),
        }
    }

    /// JSON payload as the form posts it.
    pub fn to_payload(&self) -> serde_json::Value {
        let mut payload = serde_json::json!({
            "companySize": self.company_size.as_str(),
            "trackMetrics": self.track_metrics.as_str(),
            "challenge": self.challenge.as_str(),
        });
        if let Some(industry) = &self.industry {
            payload["industry"] = serde_json::Value::String(industry.clone());
        }
        payload
    }
}
