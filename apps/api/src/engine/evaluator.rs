//! `evaluate` — the single entry point of the engine.
//!
//! Deterministic and side-effect free: the same profile always yields the
//! same report. Inputs are not range-checked; out-of-range values flow
//! through and are clamped only at the documented points.

use tracing::debug;

use crate::engine::actions::{build_actions, estimate_potential_gain, UTILIZATION_TARGET};
use crate::engine::scoring::{composite_score, derive_band, RawComponents};
use crate::models::profile::CreditProfile;
use crate::models::report::{CreditHealthReport, CreditScoreRange, HealthBand};

pub const MIN_SCORE: i32 = 300;
pub const MAX_SCORE: i32 = 850;

const PAYMENT_STRENGTH_MIN: f64 = 97.0;
const HISTORY_STRENGTH_MIN_MONTHS: i32 = 60;
const INQUIRY_RISK_ABOVE: i32 = 4;

const PAYMENT_STRENGTH: &str = "Strong on-time payment behavior is helping score stability.";
const PAYMENT_RISK: &str =
    "Payment history is below ideal and is the highest-impact score factor.";
const UTILIZATION_STRENGTH: &str = "Utilization is in a healthy range for revolving credit.";
const UTILIZATION_RISK: &str = "Utilization is high and may be suppressing score growth.";
const HISTORY_STRENGTH: &str =
    "Average credit age depth is supporting long-term score health.";
const HISTORY_RISK: &str = "Credit history depth is limited; time will improve this factor.";
const INQUIRY_RISK: &str = "Recent hard inquiry volume may temporarily drag score gains.";
const DEROGATORY_RISK: &str =
    "Derogatory marks are introducing downside pressure on score outcomes.";

pub fn evaluate(profile: &CreditProfile) -> CreditHealthReport {
    let components = RawComponents::from_profile(profile);
    let composite = composite_score(&components, profile.derogatory_marks);
    let band = derive_band(composite);

    let (strengths, risk_factors) = assess_factors(profile, &components);

    let recommended_actions = build_actions(profile);
    let gain = estimate_potential_gain(&recommended_actions);

    let estimated_score_range = CreditScoreRange {
        current: clamp_score(profile.current_score),
        conservative: clamp_score(profile.current_score.saturating_add(gain.conservative)),
        optimistic: clamp_score(profile.current_score.saturating_add(gain.optimistic)),
    };

    debug!(
        profile_id = %profile.id,
        composite,
        band = %band,
        actions = recommended_actions.len(),
        "credit profile evaluated"
    );

    CreditHealthReport {
        band,
        summary: build_summary(band),
        strengths,
        risk_factors,
        estimated_score_range,
        recommended_actions,
        component_scores: components.rounded(),
    }
}

/// Independent threshold checks. Each check adds to exactly one list.
fn assess_factors(
    profile: &CreditProfile,
    components: &RawComponents,
) -> (Vec<String>, Vec<String>) {
    let mut strengths = Vec::new();
    let mut risks = Vec::new();

    let mut classify = |is_strength: bool, strength: &str, risk: &str| {
        if is_strength {
            strengths.push(strength.to_string());
        } else {
            risks.push(risk.to_string());
        }
    };

    classify(
        components.payment_history >= PAYMENT_STRENGTH_MIN,
        PAYMENT_STRENGTH,
        PAYMENT_RISK,
    );
    classify(
        profile.utilization_ratio <= UTILIZATION_TARGET,
        UTILIZATION_STRENGTH,
        UTILIZATION_RISK,
    );
    classify(
        profile.oldest_account_months >= HISTORY_STRENGTH_MIN_MONTHS,
        HISTORY_STRENGTH,
        HISTORY_RISK,
    );

    if profile.hard_inquiries_last_12_months > INQUIRY_RISK_ABOVE {
        risks.push(INQUIRY_RISK.to_string());
    }
    if profile.derogatory_marks > 0 {
        risks.push(DEROGATORY_RISK.to_string());
    }

    (strengths, risks)
}

fn build_summary(band: HealthBand) -> String {
    format!(
        "The profile looks {} right now. Main levers are payment reliability, utilization, and inquiry pacing.",
        band.display_name()
    )
}

fn clamp_score(score: i32) -> i32 {
    score.clamp(MIN_SCORE, MAX_SCORE)
}
