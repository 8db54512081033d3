//! Advisor — turns a profile, its report and a user question into a short
//! coaching reply.
//!
//! Backends are pluggable behind the `Advisor` trait:
//! - `LlmAdvisor` calls the model through `llm_client`.
//! - `OfflineAdvisor` never calls a model; every turn gets fallback advice.
//!
//! `AppState` holds an `Arc<dyn Advisor>`, chosen at startup from config.
//! Whatever the backend does, a chat turn always produces text: model
//! failures and empty replies degrade to deterministic fallback advice.

pub mod handlers;
pub mod prompts;
pub mod session;

use async_trait::async_trait;
use chrono::Utc;
use tracing::warn;

use crate::advisor::prompts::{build_advisor_user_prompt, ADVISOR_SYSTEM_PROMPT};
use crate::advisor::session::ConversationStore;
use crate::llm_client::{ChatTurn, LlmClient, LlmError, Sampling, MODEL};
use crate::models::profile::CreditProfile;
use crate::models::report::CreditHealthReport;

const ADVISOR_SAMPLING: Sampling = Sampling {
    max_tokens: 180,
    temperature: 0.2,
};
const FALLBACK_ACTION_COUNT: usize = 3;
const FALLBACK_DISCLAIMER: &str = "Educational only, not financial advice.";

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait Advisor: Send + Sync {
    /// Produces the assistant reply for `messages` (oldest first, last one is
    /// the new user turn). `Ok(None)` means this backend does not call a model.
    async fn reply(&self, system: &str, messages: &[ChatTurn]) -> Result<Option<String>, LlmError>;

    /// Backend label reported on `/health`.
    fn backend(&self) -> &'static str;
}

pub struct LlmAdvisor(pub LlmClient);

#[async_trait]
impl Advisor for LlmAdvisor {
    async fn reply(&self, system: &str, messages: &[ChatTurn]) -> Result<Option<String>, LlmError> {
        let response = self.0.converse(system, messages, ADVISOR_SAMPLING).await?;
        Ok(Some(response.text()))
    }

    fn backend(&self) -> &'static str {
        "anthropic"
    }
}

pub struct OfflineAdvisor;

#[async_trait]
impl Advisor for OfflineAdvisor {
    async fn reply(&self, _system: &str, _messages: &[ChatTurn]) -> Result<Option<String>, LlmError> {
        Ok(None)
    }

    fn backend(&self) -> &'static str {
        "offline"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Chat turn
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct AdvisorReply {
    pub text: String,
    pub used_llm: bool,
    pub conversation_id: String,
    pub profile_context_included: bool,
}

/// Runs one advisor turn and records it in the conversation history.
pub async fn generate_advisor_reply(
    advisor: &dyn Advisor,
    conversations: &ConversationStore,
    profile: &CreditProfile,
    report: &CreditHealthReport,
    message: &str,
    conversation_id: String,
) -> AdvisorReply {
    let mut messages = conversations.history(&conversation_id, &profile.id, Utc::now());
    let profile_context_included = messages.is_empty();

    let user_prompt =
        build_advisor_user_prompt(profile, report, message, profile_context_included);
    messages.push(ChatTurn::user(user_prompt.clone()));

    let model_text = match advisor.reply(ADVISOR_SYSTEM_PROMPT, &messages).await {
        Ok(Some(text)) if !text.trim().is_empty() => Some(text),
        Ok(_) => None,
        Err(e) => {
            warn!(error = %e, model = MODEL, "llm_converse_failed");
            None
        }
    };

    let used_llm = model_text.is_some();
    let text = model_text.unwrap_or_else(|| fallback_advice(report));

    conversations.append_turn(
        &conversation_id,
        &profile.id,
        user_prompt,
        text.clone(),
        Utc::now(),
    );

    AdvisorReply {
        text,
        used_llm,
        conversation_id,
        profile_context_included,
    }
}

/// Deterministic advice built from the top recommended actions.
pub fn fallback_advice(report: &CreditHealthReport) -> String {
    let mut lines = vec![format!("Top priorities for this profile ({}):", report.band)];
    lines.extend(
        report
            .recommended_actions
            .iter()
            .take(FALLBACK_ACTION_COUNT)
            .map(|a| format!("- {} ({})", a.title, a.timeline)),
    );
    lines.push(FALLBACK_DISCLAIMER.to_string());
    lines.join("\n")
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
