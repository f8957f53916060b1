use crate::{
    error::AppError,
    message::ChatResponse,
    services::{
        prompt::build_prompt,
        provider::{ProviderReply, truncate_reply},
        risk::{RiskLevel, classify},
    },
    state::AppState,
};

pub const CRISIS_REPLY: &str = "I’m really sorry you’re feeling this way. I’m not a professional. Please contact immediate help now: TeleMANAS (India) 14416 or Emergency 112. If you are in immediate danger, call your local emergency number.";

pub const FALLBACK_REPLY: &str = "I’m here with you. Try a slow breath: inhale 4s, hold 2s, exhale 6s.";

pub const NO_API_KEY_NOTE: &str = "no-api-key";

/// Classify `message` and pick a reply. High-risk messages never reach the provider.
pub async fn generate_reply(state: &AppState, message: &str) -> Result<ChatResponse, AppError> {
    let risk = classify(message);

    if risk == RiskLevel::High {
        tracing::warn!(%risk, "crisis phrase detected, returning crisis resources");
        return Ok(ChatResponse {
            risk,
            reply: CRISIS_REPLY.to_string(),
            note: None,
        });
    }

    let Some(api_key) = state.config.api_key.as_deref() else {
        tracing::info!(%risk, "no provider credential configured, using fallback reply");
        return Ok(ChatResponse {
            risk,
            reply: FALLBACK_REPLY.to_string(),
            note: Some(NO_API_KEY_NOTE.to_string()),
        });
    };

    let payload = state
        .provider
        .generate(&state.config, api_key, build_prompt(message))
        .await?;

    let extracted = ProviderReply::from_json(payload);
    if let ProviderReply::Unknown(_) = &extracted {
        tracing::warn!("unrecognised provider response shape");
    }
    let reply = truncate_reply(extracted.into_text());

    tracing::info!(%risk, chars = reply.chars().count(), "provider reply relayed");
    Ok(ChatResponse {
        risk,
        reply,
        note: None,
    })
}
