// src/services/provider.rs
//! Client for the `generateContent` endpoint and normalization of whatever
//! JSON it sends back into a single reply string.

use std::fmt;
use std::marker::PhantomData;

use anyhow::Context;
use serde::de::{self, Deserializer, IgnoredAny, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ChatConfig;

pub const MAX_OUTPUT_TOKENS: u32 = 200;
pub const TEMPERATURE: f32 = 0.6;
pub const TOP_P: f32 = 0.95;

/// Longest reply relayed to the caller, in characters.
pub const MAX_REPLY_CHARS: usize = 800;
pub const ELLIPSIS: &str = "...";

// ===== Request =====

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<RequestContent>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestContent {
    pub parts: Vec<RequestPart>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestPart {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_output_tokens: MAX_OUTPUT_TOKENS,
            temperature: TEMPERATURE,
            top_p: TOP_P,
        }
    }
}

impl GenerateContentRequest {
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt.into() }],
            }],
            generation_config: GenerationConfig::default(),
        }
    }
}

// ===== Response =====

/// The reply payload, classified by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderReply {
    /// `candidates[0].content[0].text`
    Candidates(String),
    /// `outputs[0].content[0].text`
    Outputs(String),
    /// `candidates[0].content.parts[0].text`
    CandidateParts(String),
    /// The payload is itself a JSON string.
    Raw(String),
    Unknown(Value),
}

impl ProviderReply {
    pub fn from_json(value: Value) -> Self {
        match KnownShape::deserialize(&value) {
            Ok(KnownShape::Candidates { candidates }) => Self::Candidates(candidates.0.content.0.text.0),
            Ok(KnownShape::Outputs { outputs }) => Self::Outputs(outputs.0.content.0.text.0),
            Ok(KnownShape::CandidateParts { candidates }) => {
                Self::CandidateParts(candidates.0.content.parts.0.text.0)
            }
            Ok(KnownShape::Raw(text)) => Self::Raw(text),
            Err(_) => Self::Unknown(value),
        }
    }

    /// Unknown payloads are serialized and clipped without a marker.
    pub fn into_text(self) -> String {
        match self {
            Self::Candidates(text)
            | Self::Outputs(text)
            | Self::CandidateParts(text)
            | Self::Raw(text) => text,
            Self::Unknown(value) => clip(&value.to_string(), MAX_REPLY_CHARS).to_string(),
        }
    }
}

// Variant order is the match order.
#[derive(Deserialize)]
#[serde(untagged)]
enum KnownShape {
    Candidates { candidates: Head<InlineGeneration> },
    Outputs { outputs: Head<InlineGeneration> },
    CandidateParts { candidates: Head<PartsGeneration> },
    Raw(String),
}

#[derive(Deserialize)]
struct InlineGeneration {
    content: Head<TextPart>,
}

#[derive(Deserialize)]
struct PartsGeneration {
    content: PartsContent,
}

#[derive(Deserialize)]
struct PartsContent {
    parts: Head<TextPart>,
}

#[derive(Deserialize)]
struct TextPart {
    text: NonEmptyText,
}

#[derive(Deserialize)]
#[serde(try_from = "String")]
struct NonEmptyText(String);

impl TryFrom<String> for NonEmptyText {
    type Error = &'static str;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        if text.is_empty() {
            Err("empty text")
        } else {
            Ok(Self(text))
        }
    }
}

/// First element of a non-empty array; the rest are skipped unparsed.
struct Head<T>(T);

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Head<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HeadVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for HeadVisitor<T> {
            type Value = Head<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a non-empty array")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let first = seq
                    .next_element()?
                    .ok_or_else(|| <A::Error as de::Error>::invalid_length(0, &self))?;
                while seq.next_element::<IgnoredAny>()?.is_some() {}
                Ok(Head(first))
            }
        }

        deserializer.deserialize_seq(HeadVisitor(PhantomData))
    }
}

fn clip(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Cuts replies longer than [`MAX_REPLY_CHARS`] and marks the cut.
pub fn truncate_reply(reply: String) -> String {
    let clipped = clip(&reply, MAX_REPLY_CHARS);
    if clipped.len() == reply.len() {
        return reply;
    }
    format!("{clipped}{ELLIPSIS}")
}

// ===== Client =====

#[derive(Debug, Clone, Default)]
pub struct GeminiClient {
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// One POST, no retry. Returns the decoded JSON body whatever the status.
    pub async fn generate(&self, config: &ChatConfig, api_key: &str, prompt: String) -> anyhow::Result<Value> {
        let endpoint = config.endpoint();
        let body = GenerateContentRequest::from_prompt(prompt);

        tracing::debug!(model = %config.model, "calling generative provider");

        let response = self
            .http
            .post(&endpoint)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("request to {} failed", config.model))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, model = %config.model, "provider returned non-success status");
        }

        response
            .json::<Value>()
            .await
            .context("provider response was not valid JSON")
    }
}
