//! Axum route handler for advisor chat.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::advisor::generate_advisor_reply;
use crate::engine::evaluate;
use crate::errors::AppError;
use crate::models::report::CreditHealthReport;
use crate::state::AppState;

const MAX_CONVERSATION_ID_LEN: usize = 120;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub profile_id: String,
    pub message: String,
    pub conversation_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMeta {
    pub used_llm: bool,
    pub conversation_id: String,
    pub profile_context_included: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub advisor_text: String,
    pub report: CreditHealthReport,
    pub meta: ChatMeta,
}

impl ChatRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.profile_id.trim().is_empty() {
            return Err(AppError::Validation("profileId cannot be empty".to_string()));
        }
        if self.message.trim().is_empty() {
            return Err(AppError::Validation("message cannot be empty".to_string()));
        }
        if let Some(id) = &self.conversation_id {
            if id.chars().count() > MAX_CONVERSATION_ID_LEN {
                return Err(AppError::Validation(format!(
                    "conversationId must be at most {MAX_CONVERSATION_ID_LEN} characters"
                )));
            }
        }
        Ok(())
    }

    /// The caller's conversation id, or a fresh one when missing or blank.
    fn resolved_conversation_id(&self) -> String {
        self.conversation_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }
}

/// POST /chat
///
/// Evaluates the stored profile, then runs one advisor turn against it.
pub async fn handle_chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(request) = payload?;
    request.validate()?;

    let profile = state
        .profiles
        .find(&request.profile_id)
        .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", request.profile_id)))?;

    let report = evaluate(profile);
    let reply = generate_advisor_reply(
        state.advisor.as_ref(),
        &state.conversations,
        profile,
        &report,
        &request.message,
        request.resolved_conversation_id(),
    )
    .await;

    info!(
        profile_id = %profile.id,
        conversation_id = %reply.conversation_id,
        used_llm = reply.used_llm,
        profile_context_included = reply.profile_context_included,
        health_band = %report.band,
        advisor_backend = state.advisor.backend(),
        "chat_request_completed"
    );

    Ok(Json(ChatResponse {
        advisor_text: reply.text,
        report,
        meta: ChatMeta {
            used_llm: reply.used_llm,
            conversation_id: reply.conversation_id,
            profile_context_included: reply.profile_context_included,
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(conversation_id: Option<&str>) -> ChatRequest {
        ChatRequest {
            profile_id: "u-1".to_string(),
            message: "How do I improve?".to_string(),
            conversation_id: conversation_id.map(str::to_string),
        }
    }

    #[test]
    fn test_blank_conversation_id_gets_fresh_uuid() {
        let id = request(Some("   ")).resolved_conversation_id();
        assert!(Uuid::parse_str(&id).is_ok());

        let id = request(None).resolved_conversation_id();
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn test_conversation_id_is_trimmed() {
        assert_eq!(request(Some("  c-42 ")).resolved_conversation_id(), "c-42");
    }

    #[test]
    fn test_validation_rejects_blank_fields() {
        let mut r = request(None);
        r.message = "  ".to_string();
        assert!(matches!(r.validate(), Err(AppError::Validation(_))));

        let mut r = request(None);
        r.profile_id = String::new();
        assert!(matches!(r.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_validation_caps_conversation_id_length() {
        let long = "c".repeat(121);
        assert!(request(Some(&long)).validate().is_err());
        let max = "c".repeat(120);
        assert!(request(Some(&max)).validate().is_ok());
    }
}
