//! Component sub-scores, composite weighting, and band selection.
//!
//! Every sub-score lands in 0 – 100 before weighting. The thresholds and
//! slopes are product-tuned and must stay exactly as they are.

use crate::models::profile::CreditProfile;
use crate::models::report::{ComponentScores, HealthBand};

#[derive(Debug, Clone, Copy)]
pub struct ComponentWeights {
    pub payment_history: f64,
    pub utilization: f64,
    pub history_depth: f64,
    pub inquiries_and_mix: f64,
}

/// Fixed composite weights. Sum to 1.0.
pub const WEIGHTS: ComponentWeights = ComponentWeights {
    payment_history: 0.35,
    utilization: 0.30,
    history_depth: 0.15,
    inquiries_and_mix: 0.20,
};

const DEROGATORY_POINTS_PER_MARK: f64 = 10.0;
const DEROGATORY_PENALTY_CAP: f64 = 25.0;

const HISTORY_DEPTH_FULL_MONTHS: f64 = 120.0;
const HISTORY_DEPTH_FLOOR: f64 = 10.0;

const LINE_SCORE_FULL_LINES: f64 = 6.0;
const LINE_SCORE_MIN: f64 = 15.0;
const LINE_SCORE_MAX: f64 = 70.0;
const INQUIRY_BUDGET: f64 = 30.0;
const INQUIRY_POINTS_EACH: f64 = 8.0;
const INQUIRY_PENALTY_CAP: f64 = 40.0;

/// Unrounded sub-scores feeding the composite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawComponents {
    pub payment_history: f64,
    pub utilization: f64,
    pub history_depth: f64,
    pub inquiries_and_mix: f64,
}

impl RawComponents {
    pub fn from_profile(profile: &CreditProfile) -> Self {
        Self {
            payment_history: score_payment_history(profile.on_time_payment_rate),
            utilization: score_utilization(profile.utilization_ratio),
            history_depth: score_history_depth(profile.oldest_account_months),
            inquiries_and_mix: score_inquiries_and_mix(
                profile.credit_lines,
                profile.hard_inquiries_last_12_months,
            ),
        }
    }

    /// Weighted sum of the four components, before the derogatory penalty.
    pub fn weighted(&self) -> f64 {
        self.payment_history * WEIGHTS.payment_history
            + self.utilization * WEIGHTS.utilization
            + self.history_depth * WEIGHTS.history_depth
            + self.inquiries_and_mix * WEIGHTS.inquiries_and_mix
    }

    pub fn rounded(&self) -> ComponentScores {
        ComponentScores {
            payment_history: round_score(self.payment_history),
            utilization: round_score(self.utilization),
            history_depth: round_score(self.history_depth),
            inquiries_and_mix: round_score(self.inquiries_and_mix),
        }
    }
}

pub fn score_payment_history(on_time_rate: f64) -> f64 {
    (on_time_rate * 100.0).clamp(0.0, 100.0)
}

/// Piecewise-linear and decreasing; continuous at 0.10, 0.30, 0.50 and 0.75.
pub fn score_utilization(ratio: f64) -> f64 {
    if ratio <= 0.10 {
        100.0
    } else if ratio <= 0.30 {
        80.0 + (0.30 - ratio) * 100.0
    } else if ratio <= 0.50 {
        55.0 + (0.50 - ratio) * 125.0
    } else if ratio <= 0.75 {
        25.0 + (0.75 - ratio) * 120.0
    } else {
        (10.0 - (ratio - 0.75) * 60.0).clamp(0.0, 20.0)
    }
}

pub fn score_history_depth(oldest_account_months: i32) -> f64 {
    (f64::from(oldest_account_months) / HISTORY_DEPTH_FULL_MONTHS * 100.0)
        .clamp(HISTORY_DEPTH_FLOOR, 100.0)
}

pub fn score_inquiries_and_mix(credit_lines: i32, hard_inquiries: i32) -> f64 {
    let line_score = (f64::from(credit_lines) / LINE_SCORE_FULL_LINES * LINE_SCORE_MAX)
        .clamp(LINE_SCORE_MIN, LINE_SCORE_MAX);
    let inquiry_penalty =
        (f64::from(hard_inquiries) * INQUIRY_POINTS_EACH).clamp(0.0, INQUIRY_PENALTY_CAP);
    (line_score + (INQUIRY_BUDGET - inquiry_penalty)).clamp(0.0, 100.0)
}

pub fn derogatory_penalty(derogatory_marks: i32) -> f64 {
    (f64::from(derogatory_marks) * DEROGATORY_POINTS_PER_MARK).clamp(0.0, DEROGATORY_PENALTY_CAP)
}

/// Composite health score used only for band selection.
pub fn composite_score(components: &RawComponents, derogatory_marks: i32) -> f64 {
    (components.weighted() - derogatory_penalty(derogatory_marks)).clamp(0.0, 100.0)
}

pub fn derive_band(composite: f64) -> HealthBand {
    match composite {
        s if s >= 85.0 => HealthBand::Excellent,
        s if s >= 72.0 => HealthBand::Strong,
        s if s >= 55.0 => HealthBand::Stable,
        s if s >= 40.0 => HealthBand::AtRisk,
        _ => HealthBand::Critical,
    }
}

fn round_score(value: f64) -> u32 {
    value.round().clamp(0.0, 100.0) as u32
}
