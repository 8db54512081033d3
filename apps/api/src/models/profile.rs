use serde::{Deserialize, Serialize};

/// A consumer credit profile as supplied by the profile source.
///
/// Counts are signed on purpose: malformed negative values are accepted and
/// flow through scoring untouched, the engine only clamps where it must.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditProfile {
    pub id: String,
    pub label: String,
    pub current_score: i32,
    pub credit_lines: i32,
    pub utilization_ratio: f64,
    pub on_time_payment_rate: f64,
    pub oldest_account_months: i32,
    pub hard_inquiries_last_12_months: i32,
    pub derogatory_marks: i32,
    #[serde(default)]
    pub notes: Vec<String>,

    // Narrative enrichment for the advisor; never read by the engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_line_history: Option<Vec<CreditLineRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oldest_account_detail: Option<OldestAccountRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hard_inquiry_history: Option<Vec<HardInquiryRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derogatory_mark_history: Option<Vec<DerogatoryMarkRecord>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditLineRecord {
    pub account_name: String,
    pub limit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OldestAccountRecord {
    pub account_name: String,
    pub opened_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardInquiryRecord {
    pub lender: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerogatoryMarkRecord {
    pub item: String,
    pub date: String,
    pub status: String,
}
