//! Maturity scoring.
//!
//! [`compute`] maps a [`SnapshotInput`] to a [`SnapshotResult`] by fixed
//! point additions and three score buckets. The weights and the stage copy
//! are product copy and must stay byte-for-byte stable.

use serde::{Deserialize, Serialize};

use crate::input::{Challenge, CompanySize, SnapshotInput, TrackMetrics};

/// Every snapshot starts from this score.
pub const BASE_SCORE: i64 = 20;

/// Lowest score that reaches stage 2.
pub const BUILD_MOMENTUM_THRESHOLD: u32 = 40;

/// Lowest score that reaches stage 3.
pub const REPORTING_THRESHOLD: u32 = 70;

impl TrackMetrics {
    /// Points contributed to the score. Unknown answers count as "No".
    pub fn weight(&self) -> i64 {
        match self {
            Self::Yes => 25,
            Self::Somewhat => 15,
            Self::No | Self::Other(_) => 5,
        }
    }
}

impl CompanySize {
    /// Points contributed to the score. Unknown answers count as "201+".
    pub fn weight(&self) -> i64 {
        match self {
            Self::Small => 5,
            Self::Mid => 10,
            Self::Large | Self::Other(_) => 15,
        }
    }
}

impl Challenge {
    /// Points contributed to the score. Only three challenges move it.
    pub fn weight(&self) -> i64 {
        match self {
            Self::DataCollection => 5,
            Self::ComplianceReporting => 10,
            Self::TargetsStrategy => 15,
            Self::CostOperations | Self::GovernanceOwnership | Self::Other(_) => 0,
        }
    }
}

/// One of the three maturity tiers a score falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    StartingPoint,
    BuildMomentum,
    ReportingAndScale,
}

impl Stage {
    pub fn from_score(score: u32) -> Self {
        if score >= REPORTING_THRESHOLD {
            Self::ReportingAndScale
        } else if score >= BUILD_MOMENTUM_THRESHOLD {
            Self::BuildMomentum
        } else {
            Self::StartingPoint
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Self::StartingPoint => 1,
            Self::BuildMomentum => 2,
            Self::ReportingAndScale => 3,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::StartingPoint => "Starting Point",
            Self::BuildMomentum => "Build Momentum",
            Self::ReportingAndScale => "Reporting & Scale",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::StartingPoint => {
                "You're at the beginning — focus on baselines, boundaries, and KPI ownership."
            }
            Self::BuildMomentum => {
                "You have the basics — now standardize data capture and expand coverage."
            }
            Self::ReportingAndScale => {
                "You're tracking well — now strengthen governance and turn progress into stakeholder-ready reporting."
            }
        }
    }

    /// Recommended service package.
    pub fn engagement(self) -> &'static str {
        match self {
            Self::StartingPoint => {
                "ESG Foundation Sprint (baseline + KPI dictionary + data ownership)."
            }
            Self::BuildMomentum => "ESG Ops Pack (data workflows + KPI tracking + review cadence).",
            Self::ReportingAndScale => {
                "ESG Reporting Pack (report structure + evidence checklist + leadership dashboard)."
            }
        }
    }

    pub fn next_steps(self) -> [&'static str; 4] {
        match self {
            Self::StartingPoint => [
                "Define measurement boundaries (energy, waste, emissions).",
                "Create a KPI dictionary (what, how, owner, cadence).",
                "Set 12 core KPIs you can track reliably.",
                "Assign owners and start a monthly review cadence.",
            ],
            Self::BuildMomentum => [
                "Standardize data collection templates and sources.",
                "Introduce monthly KPI reviews and action tracking.",
                "Add supplier / scope data where relevant.",
                "Document controls and evidence collection.",
            ],
            Self::ReportingAndScale => [
                "Create a reporting narrative linked to KPIs and initiatives.",
                "Build an evidence checklist for audit / review readiness.",
                "Improve governance: cadence, owners, escalation paths.",
                "Publish quarterly progress updates for stakeholders.",
            ],
        }
    }
}

/// Score and narrative returned to the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SnapshotResult {
    pub score: u32,
    pub stage: u8,
    pub title: String,
    pub desc: String,
    pub engagement: String,
    pub next_steps: Vec<String>,
}

impl SnapshotResult {
    fn for_stage(score: u32, stage: Stage) -> Self {
        Self {
            score,
            stage: stage.number(),
            title: stage.title().to_string(),
            desc: stage.description().to_string(),
            engagement: stage.engagement().to_string(),
            next_steps: stage.next_steps().iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Clamp a raw point total into `0..=100`.
pub fn clamp_score(raw: i64) -> u32 {
    raw.clamp(0, 100) as u32
}

/// Raw point total before clamping.
pub fn raw_score(input: &SnapshotInput) -> i64 {
    BASE_SCORE
        + input.track_metrics.weight()
        + input.company_size.weight()
        + input.challenge.weight()
}

/// Score an assessment.
pub fn compute(input: &SnapshotInput) -> SnapshotResult {
    let score = clamp_score(raw_score(input));
    SnapshotResult::for_stage(score, Stage::from_score(score))
}
