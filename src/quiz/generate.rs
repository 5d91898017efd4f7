//! Quiz generation: prompt assembly, reply sanitization, and schema
//! validation of the returned question list.

use anyhow::{anyhow, Result};
use log::warn;
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

use crate::groq::{ChatCompletion, CompletionRequest};
use crate::message::{ChatMessage, ChatRole, MessageContent};
use crate::models;
use crate::prompts;
use crate::quiz::{QuestionKind, QuizQuestion, QuizSession};

/// Parameters of one quiz generation request
#[derive(Debug, Clone)]
pub struct QuizParams {
    pub topic: String,
    pub question_count: usize,
    pub difficulty: String,
    pub model: String,
    /// Course material the questions must be grounded in; empty for a free
    /// topic
    pub context: String,
}

/// Outcome of a successful generation. The service is not guaranteed to
/// honor the requested count; an under-count is surfaced, never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationReport {
    pub requested: usize,
    pub produced: usize,
}

impl GenerationReport {
    pub fn under_count(&self) -> bool {
        self.produced < self.requested
    }
}

#[derive(Deserialize)]
struct QuestionEnvelope {
    questions: Vec<QuizQuestion>,
}

/// Strip an optional Markdown code fence wrapping a model reply
pub fn strip_code_fences(reply: &str) -> String {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    let fence = FENCE
        .get_or_init(|| Regex::new(r"(?s)^\s*```(?:json)?\s*(.*?)\s*```\s*$").expect("valid regex"));
    match fence.captures(reply.trim()) {
        Some(captures) => captures[1].to_string(),
        None => reply.trim().to_string(),
    }
}

/// Parse a question list from a raw model reply.
///
/// Accepts either a bare JSON array or a `{"questions": [...]}` envelope,
/// and requires every multiple-choice question to carry exactly 4 choices.
pub fn parse_question_list(reply: &str) -> Result<Vec<QuizQuestion>> {
    let body = strip_code_fences(reply);

    let questions: Vec<QuizQuestion> = match serde_json::from_str(&body) {
        Ok(list) => list,
        Err(_) => serde_json::from_str::<QuestionEnvelope>(&body)
            .map(|envelope| envelope.questions)
            .map_err(|e| anyhow!("reply is not a valid question list: {}", e))?,
    };

    for question in &questions {
        if question.kind == QuestionKind::MultipleChoice && question.choices.len() != 4 {
            return Err(anyhow!(
                "multiple-choice question \"{}\" carries {} choices instead of 4",
                question.question,
                question.choices.len()
            ));
        }
    }

    Ok(questions)
}

/// Generate a quiz and install it into the session.
///
/// Drives start -> generating -> questioning on success. Any failure
/// (request, parse, or an empty question list) rolls the session back to
/// start and returns a descriptive failure string for the UI.
pub async fn generate_quiz<C: ChatCompletion>(
    client: &C,
    session: &mut QuizSession,
    params: &QuizParams,
) -> Result<GenerationReport, String> {
    session.begin_generating().map_err(|e| e.to_string())?;

    let prompt = prompts::quiz_generation_prompt(
        &params.topic,
        &params.difficulty,
        params.question_count,
        &params.context,
    );
    let messages = vec![
        ChatMessage::new(ChatRole::System, MessageContent::text(prompts::QUIZ_PERSONA)),
        ChatMessage::new(ChatRole::User, MessageContent::text(prompt)),
    ];
    let request = CompletionRequest::new(
        &params.model,
        messages,
        models::QUIZ_TEMPERATURE,
        models::QUIZ_MAX_TOKENS,
    )
    .json_mode();

    let reply = match client.complete(&request).await {
        Ok(reply) => reply,
        Err(e) => {
            session.fail_generation();
            return Err(format!("quiz generation request failed: {}", e));
        }
    };

    let questions = match parse_question_list(&reply) {
        Ok(questions) => questions,
        Err(e) => {
            session.fail_generation();
            return Err(format!("quiz generation returned malformed output: {}", e));
        }
    };

    let produced = questions.len();
    session
        .install_questions(questions)
        .map_err(|e| e.to_string())?;

    let report = GenerationReport {
        requested: params.question_count,
        produced,
    };
    if report.under_count() {
        warn!(
            "quiz generation produced {} of {} requested questions",
            report.produced, report.requested
        );
    }
    Ok(report)
}
