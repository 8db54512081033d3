// Advisor prompt constants and builders.
// The analysis block deliberately leaves out component scores; the model
// only sees the band, narrative lists, range and actions.

use serde::Serialize;

use crate::models::profile::{
    CreditLineRecord, CreditProfile, DerogatoryMarkRecord, HardInquiryRecord,
    OldestAccountRecord,
};
use crate::models::report::{CreditAction, CreditHealthReport, CreditScoreRange, HealthBand};

pub const ADVISOR_SYSTEM_PROMPT: &str = "You are a credit coach. \
    Give practical, non-judgmental guidance in plain language. \
    Keep responses short, they must be under 67 words.";

const CONTEXT_FOLLOW_UP: &str =
    "Use the Profile and Analysis context already provided earlier in this conversation.";
const CONTEXT_INSTRUCTION: &str = "Use this context to answer the user question.";

/// Profile view sent to the model. Missing detail collections render as
/// `null` or `[]` so the shape is stable across profiles.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PromptProfile<'a> {
    id: &'a str,
    label: &'a str,
    current_score: i32,
    credit_lines: i32,
    utilization_ratio: f64,
    on_time_payment_rate: f64,
    oldest_account_months: i32,
    oldest_account_detail: Option<&'a OldestAccountRecord>,
    hard_inquiries_last_12_months: i32,
    credit_line_history: &'a [CreditLineRecord],
    hard_inquiry_history: &'a [HardInquiryRecord],
    derogatory_marks: i32,
    derogatory_mark_history: &'a [DerogatoryMarkRecord],
    notes: &'a [String],
}

impl<'a> From<&'a CreditProfile> for PromptProfile<'a> {
    fn from(p: &'a CreditProfile) -> Self {
        Self {
            id: &p.id,
            label: &p.label,
            current_score: p.current_score,
            credit_lines: p.credit_lines,
            utilization_ratio: p.utilization_ratio,
            on_time_payment_rate: p.on_time_payment_rate,
            oldest_account_months: p.oldest_account_months,
            oldest_account_detail: p.oldest_account_detail.as_ref(),
            hard_inquiries_last_12_months: p.hard_inquiries_last_12_months,
            credit_line_history: p.credit_line_history.as_deref().unwrap_or_default(),
            hard_inquiry_history: p.hard_inquiry_history.as_deref().unwrap_or_default(),
            derogatory_marks: p.derogatory_marks,
            derogatory_mark_history: p.derogatory_mark_history.as_deref().unwrap_or_default(),
            notes: &p.notes,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PromptAnalysis<'a> {
    band: HealthBand,
    summary: &'a str,
    strengths: &'a [String],
    risk_factors: &'a [String],
    estimated_score_range: CreditScoreRange,
    recommended_actions: &'a [CreditAction],
}

impl<'a> From<&'a CreditHealthReport> for PromptAnalysis<'a> {
    fn from(r: &'a CreditHealthReport) -> Self {
        Self {
            band: r.band,
            summary: &r.summary,
            strengths: &r.strengths,
            risk_factors: &r.risk_factors,
            estimated_score_range: r.estimated_score_range,
            recommended_actions: &r.recommended_actions,
        }
    }
}

/// Builds the user turn. Profile and analysis are only attached on the first
/// turn of a conversation; later turns point back at them.
pub fn build_advisor_user_prompt(
    profile: &CreditProfile,
    report: &CreditHealthReport,
    user_message: &str,
    include_context: bool,
) -> String {
    let question = format!("User question: {user_message}");

    if !include_context {
        return [question.as_str(), "", CONTEXT_FOLLOW_UP].join("\n");
    }

    let profile_json =
        serde_json::to_string_pretty(&PromptProfile::from(profile)).unwrap_or_default();
    let analysis_json =
        serde_json::to_string_pretty(&PromptAnalysis::from(report)).unwrap_or_default();

    [
        question.as_str(),
        "",
        "Profile:",
        profile_json.as_str(),
        "",
        "Analysis:",
        analysis_json.as_str(),
        "",
        CONTEXT_INSTRUCTION,
    ]
    .join("\n")
}
