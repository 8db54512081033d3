use serde::{Deserialize, Serialize};

/// Categorical overall health, ordered worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthBand {
    Critical,
    AtRisk,
    Stable,
    Strong,
    Excellent,
}

impl HealthBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthBand::Critical => "critical",
            HealthBand::AtRisk => "at_risk",
            HealthBand::Stable => "stable",
            HealthBand::Strong => "strong",
            HealthBand::Excellent => "excellent",
        }
    }

    /// Human-facing name: `at_risk` reads as "at risk".
    pub fn display_name(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl std::fmt::Display for HealthBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionImpact {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditAction {
    pub id: String,
    pub title: String,
    pub why: String,
    pub timeline: String,
    pub impact: ActionImpact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditScoreRange {
    pub current: i32,
    pub conservative: i32,
    pub optimistic: i32,
}

/// Rounded sub-scores, each 0 – 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentScores {
    pub payment_history: u32,
    pub utilization: u32,
    pub history_depth: u32,
    pub inquiries_and_mix: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditHealthReport {
    pub band: HealthBand,
    pub summary: String,
    pub strengths: Vec<String>,
    pub risk_factors: Vec<String>,
    pub estimated_score_range: CreditScoreRange,
    pub recommended_actions: Vec<CreditAction>,
    pub component_scores: ComponentScores,
}
