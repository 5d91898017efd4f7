//! Model catalog and per-request limits for the Groq endpoint.

/// Selectable text models, in display order
pub const TEXT_MODELS: &[&str] = &[
    "llama-3.1-8b-instant",
    "openai/gpt-oss-120b",
    "openai/gpt-oss-20b",
    "llama-3.3-70b-versatile",
    "moonshotai/kimi-k2-instruct-0905",
];

/// Vision-capable model used whenever image content is present
pub const VISION_MODEL: &str = "meta-llama/llama-4-scout-17b-16e-instruct";

pub const DEFAULT_TEXT_MODEL: &str = "llama-3.3-70b-versatile";

pub const CHAT_TEMPERATURE: f32 = 0.7;
pub const QUIZ_TEMPERATURE: f32 = 0.5;
pub const GRADING_TEMPERATURE: f32 = 0.0;

pub const CHAT_MAX_TOKENS: u32 = 2048;
pub const VISION_MAX_TOKENS: u32 = 1024;
pub const QUIZ_MAX_TOKENS: u32 = 4096;
pub const GRADING_MAX_TOKENS: u32 = 1024;

/// Model id and output budget for a chat request, depending on whether
/// image content is attached
pub fn for_request(has_image: bool) -> (&'static str, u32) {
    if has_image {
        (VISION_MODEL, VISION_MAX_TOKENS)
    } else {
        (DEFAULT_TEXT_MODEL, CHAT_MAX_TOKENS)
    }
}
