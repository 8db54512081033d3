//! Recommended actions — an ordered table of `(predicate, action)` rules.
//!
//! Rules are checked in table order and every matching rule contributes its
//! action. When nothing matches, the maintain-routine action is returned so
//! the list is never empty.

use crate::models::profile::CreditProfile;
use crate::models::report::{ActionImpact, CreditAction};

/// A fixed action attached to the condition that triggers it.
pub struct ActionRule {
    pub applies: fn(&CreditProfile) -> bool,
    pub action: ActionTemplate,
}

/// Static action content. Never synthesized from profile values.
#[derive(Debug, Clone, Copy)]
pub struct ActionTemplate {
    pub id: &'static str,
    pub title: &'static str,
    pub why: &'static str,
    pub timeline: &'static str,
    pub impact: ActionImpact,
}

impl ActionTemplate {
    pub fn to_action(&self) -> CreditAction {
        CreditAction {
            id: self.id.to_string(),
            title: self.title.to_string(),
            why: self.why.to_string(),
            timeline: self.timeline.to_string(),
            impact: self.impact,
        }
    }
}

const ON_TIME_RATE_TARGET: f64 = 0.97;
pub(crate) const UTILIZATION_TARGET: f64 = 0.30;
const INQUIRY_PAUSE_ABOVE: i32 = 2;
const THIN_FILE_BELOW_LINES: i32 = 2;
const YOUNG_FILE_BELOW_MONTHS: i32 = 24;

pub const ACTION_RULES: &[ActionRule] = &[
    ActionRule {
        applies: |p| p.on_time_payment_rate < ON_TIME_RATE_TARGET,
        action: ActionTemplate {
            id: "autopay-and-calendar-guardrails",
            title: "Protect payment history with autopay and reminders",
            why: "Preventing any new late payments is the fastest way to stop compounding damage.",
            timeline: "30-90 days",
            impact: ActionImpact::High,
        },
    },
    ActionRule {
        applies: |p| p.utilization_ratio > UTILIZATION_TARGET,
        action: ActionTemplate {
            id: "lower-utilization",
            title: "Reduce revolving utilization below 30% (ideally below 10%)",
            why: "High balances relative to limits can significantly suppress score potential.",
            timeline: "15-60 days",
            impact: ActionImpact::High,
        },
    },
    ActionRule {
        applies: |p| p.hard_inquiries_last_12_months > INQUIRY_PAUSE_ABOVE,
        action: ActionTemplate {
            id: "pause-hard-inquiries",
            title: "Pause non-essential credit applications",
            why: "Fewer hard pulls can reduce short-term scoring pressure.",
            timeline: "30-180 days",
            impact: ActionImpact::Medium,
        },
    },
    ActionRule {
        applies: |p| p.derogatory_marks > 0,
        action: ActionTemplate {
            id: "clean-up-derogatories",
            title: "Work a cleanup plan for derogatory items",
            why: "Addressing inaccuracies or settling eligible items can improve future underwriting outcomes.",
            timeline: "60-180 days",
            impact: ActionImpact::High,
        },
    },
    ActionRule {
        applies: |p| p.credit_lines < THIN_FILE_BELOW_LINES,
        action: ActionTemplate {
            id: "responsible-line-expansion",
            title: "Add one managed credit line only if budget supports it",
            why: "A thin file can benefit from additional positive payment history and available credit.",
            timeline: "60-180 days",
            impact: ActionImpact::Medium,
        },
    },
    ActionRule {
        applies: |p| p.oldest_account_months < YOUNG_FILE_BELOW_MONTHS,
        action: ActionTemplate {
            id: "preserve-oldest-account",
            title: "Keep oldest accounts open and active",
            why: "Credit age builds slowly and supports longer-term score resilience.",
            timeline: "ongoing",
            impact: ActionImpact::Medium,
        },
    },
];

pub const MAINTAIN_ROUTINE: ActionTemplate = ActionTemplate {
    id: "maintain-routine",
    title: "Maintain current habits and monitor monthly",
    why: "Strong profiles benefit most from consistency and avoiding avoidable inquiries.",
    timeline: "ongoing",
    impact: ActionImpact::Low,
};

pub fn build_actions(profile: &CreditProfile) -> Vec<CreditAction> {
    let mut actions: Vec<CreditAction> = ACTION_RULES
        .iter()
        .filter(|rule| (rule.applies)(profile))
        .map(|rule| rule.action.to_action())
        .collect();

    if actions.is_empty() {
        actions.push(MAINTAIN_ROUTINE.to_action());
    }

    actions
}

/// Score points one action is expected to recover, as `(conservative, optimistic)`.
pub fn impact_points(impact: ActionImpact) -> (i32, i32) {
    match impact {
        ActionImpact::High => (18, 35),
        ActionImpact::Medium => (9, 18),
        ActionImpact::Low => (3, 8),
    }
}

const CONSERVATIVE_GAIN_BOUNDS: (i32, i32) = (8, 80);
const OPTIMISTIC_GAIN_BOUNDS: (i32, i32) = (15, 150);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GainPotential {
    pub conservative: i32,
    pub optimistic: i32,
}

pub fn estimate_potential_gain(actions: &[CreditAction]) -> GainPotential {
    let (conservative, optimistic) = actions
        .iter()
        .map(|a| impact_points(a.impact))
        .fold((0, 0), |(c, o), (dc, d_o)| (c + dc, o + d_o));

    GainPotential {
        conservative: conservative.clamp(CONSERVATIVE_GAIN_BOUNDS.0, CONSERVATIVE_GAIN_BOUNDS.1),
        optimistic: optimistic.clamp(OPTIMISTIC_GAIN_BOUNDS.0, OPTIMISTIC_GAIN_BOUNDS.1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_profile() -> CreditProfile {
        CreditProfile {
            id: "u-test".to_string(),
            label: "Trigger-free".to_string(),
            current_score: 760,
            credit_lines: 4,
            utilization_ratio: 0.05,
            on_time_payment_rate: 1.0,
            oldest_account_months: 80,
            hard_inquiries_last_12_months: 0,
            derogatory_marks: 0,
            notes: vec![],
            credit_line_history: None,
            oldest_account_detail: None,
            hard_inquiry_history: None,
            derogatory_mark_history: None,
        }
    }

    fn ids(actions: &[CreditAction]) -> Vec<&str> {
        actions.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn test_no_trigger_yields_maintain_routine_only() {
        let actions = build_actions(&base_profile());
        assert_eq!(ids(&actions), vec!["maintain-routine"]);
        assert_eq!(actions[0].impact, ActionImpact::Low);
    }

    #[test]
    fn test_all_triggers_keep_table_order() {
        let profile = CreditProfile {
            credit_lines: 1,
            utilization_ratio: 0.86,
            on_time_payment_rate: 0.82,
            oldest_account_months: 18,
            hard_inquiries_last_12_months: 3,
            derogatory_marks: 1,
            ..base_profile()
        };
        let actions = build_actions(&profile);
        assert_eq!(
            ids(&actions),
            vec![
                "autopay-and-calendar-guardrails",
                "lower-utilization",
                "pause-hard-inquiries",
                "clean-up-derogatories",
                "responsible-line-expansion",
                "preserve-oldest-account",
            ]
        );
    }

    #[test]
    fn test_thresholds_are_strict() {
        let at_edges = CreditProfile {
            on_time_payment_rate: 0.97,
            utilization_ratio: 0.30,
            hard_inquiries_last_12_months: 2,
            credit_lines: 2,
            oldest_account_months: 24,
            ..base_profile()
        };
        assert_eq!(ids(&build_actions(&at_edges)), vec!["maintain-routine"]);
    }

    #[test]
    fn test_single_trigger_suppresses_fallback() {
        let profile = CreditProfile {
            hard_inquiries_last_12_months: 3,
            ..base_profile()
        };
        assert_eq!(ids(&build_actions(&profile)), vec!["pause-hard-inquiries"]);
    }

    #[test]
    fn test_optimistic_points_never_below_conservative() {
        for impact in [ActionImpact::High, ActionImpact::Medium, ActionImpact::Low] {
            let (c, o) = impact_points(impact);
            assert!(o >= c);
        }
    }

    #[test]
    fn test_gain_floor_applies_to_single_low_action() {
        let gain = estimate_potential_gain(&[MAINTAIN_ROUTINE.to_action()]);
        assert_eq!(
            gain,
            GainPotential {
                conservative: 8,
                optimistic: 15
            }
        );
    }

    #[test]
    fn test_gain_caps_with_every_action() {
        let actions: Vec<CreditAction> = ACTION_RULES.iter().map(|r| r.action.to_action()).collect();
        // 3 high + 3 medium: 81 / 159 before caps
        let gain = estimate_potential_gain(&actions);
        assert_eq!(gain.conservative, 80);
        assert_eq!(gain.optimistic, 150);
    }

    #[test]
    fn test_gain_sums_mixed_actions() {
        let actions: Vec<CreditAction> = ACTION_RULES[..3].iter().map(|r| r.action.to_action()).collect();
        // high + high + medium
        let gain = estimate_potential_gain(&actions);
        assert_eq!(gain.conservative, 45);
        assert_eq!(gain.optimistic, 88);
    }
}
