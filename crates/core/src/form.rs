//! The public form's answer slugs and their mapping to backend vocabulary.

use serde::{Deserialize, Serialize};

use crate::input::{Challenge, CompanySize, SnapshotInput, TrackMetrics};

/// Raw select-box values as the form submits them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormAnswers {
    pub industry: String,
    /// `small`, `mid` or `large`.
    pub size: String,
    /// `structured`, `partial` or `none`.
    pub tracking: String,
    /// `data`, `compliance`, `cost`, `governance` or `story`.
    pub challenge: String,
}

impl FormAnswers {
    /// The form refuses to submit until every select has a value.
    pub fn is_complete(&self) -> bool {
        [&self.industry, &self.size, &self.tracking, &self.challenge]
            .iter()
            .all(|answer| !answer.is_empty())
    }

    /// Translate the slugs into a [`SnapshotInput`].
    pub fn into_input(self) -> SnapshotInput {
        let track_metrics = match self.tracking.as_str() {
            "structured" => TrackMetrics::Yes,
            "partial" => TrackMetrics::Somewhat,
            _ => TrackMetrics::No,
        };

        let company_size = match self.size.as_str() {
            "small" => CompanySize::Small,
            "mid" => CompanySize::Mid,
            _ => CompanySize::Large,
        };

        let challenge = match self.challenge.as_str() {
            "data" => Challenge::DataCollection,
            "compliance" => Challenge::ComplianceReporting,
            "cost" => Challenge::CostOperations,
            "governance" => Challenge::GovernanceOwnership,
            // "story" and anything unrecognized
            _ => Challenge::TargetsStrategy,
        };

        SnapshotInput {
            industry: Some(self.industry).filter(|s| !s.is_empty()),
            company_size,
            track_metrics,
            challenge,
        }
    }

    /// JSON body posted to `/api/snapshot`.
    pub fn into_payload(self) -> serde_json::Value {
        self.into_input().to_payload()
    }
}
