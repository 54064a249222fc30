//! Request body sent to the inference endpoint.

use crate::config::GenerationConfig;
use serde::Serialize;

/// Single-turn instruction prompt. `{topic}` is replaced verbatim.
pub const PROMPT_TEMPLATE: &str =
    "<s>[INST]Human: Write a 200 word blog post on the topic: {topic}\n    Assistant: [/INST]";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InferencePayload {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
}

impl InferencePayload {
    pub fn for_topic(topic: &str, params: &GenerationConfig) -> Self {
        Self {
            prompt: PROMPT_TEMPLATE.replace("{topic}", topic),
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            top_p: params.top_p,
            top_k: params.top_k,
        }
    }
}
