//! Answer grading: deterministic comparison for multiple-choice questions,
//! a model call with a strict JSON contract for open ones.

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::groq::{ChatCompletion, CompletionRequest};
use crate::message::{ChatMessage, ChatRole, MessageContent};
use crate::models;
use crate::prompts;
use crate::quiz::generate::strip_code_fences;
use crate::quiz::{Correction, QuestionKind, QuizQuestion};

/// Grading capability injected into `QuizSession::finalize`.
///
/// Implementations never fail: a grading problem becomes a score-0
/// correction with diagnostic feedback.
#[async_trait]
pub trait Grader: Send + Sync {
    async fn grade(&self, question: &QuizQuestion, user_answer: &str) -> Correction;
}

/// Production grader backed by a completion service
pub struct ModelGrader<'a, C: ChatCompletion> {
    client: &'a C,
    model: String,
}

impl<'a, C: ChatCompletion> ModelGrader<'a, C> {
    pub fn new(client: &'a C, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    async fn grade_open(&self, question: &QuizQuestion, user_answer: &str) -> Correction {
        let messages = vec![
            ChatMessage::new(ChatRole::System, MessageContent::text(prompts::TUTOR_PERSONA)),
            ChatMessage::new(
                ChatRole::User,
                MessageContent::text(prompts::grading_prompt(question, user_answer)),
            ),
        ];
        let request = CompletionRequest::new(
            &self.model,
            messages,
            models::GRADING_TEMPERATURE,
            models::GRADING_MAX_TOKENS,
        )
        .json_mode();

        match self.client.complete(&request).await {
            Ok(reply) => parse_correction(&reply).unwrap_or_else(|e| Correction {
                score: 0,
                feedback: format!("Automatic grading returned an unreadable verdict: {}", e),
            }),
            Err(e) => Correction {
                score: 0,
                feedback: format!("Automatic grading was unavailable: {}", e),
            },
        }
    }
}

#[async_trait]
impl<'a, C: ChatCompletion> Grader for ModelGrader<'a, C> {
    async fn grade(&self, question: &QuizQuestion, user_answer: &str) -> Correction {
        match question.kind {
            QuestionKind::MultipleChoice => grade_multiple_choice(question, user_answer),
            QuestionKind::Open => self.grade_open(question, user_answer).await,
        }
    }
}

/// Case-insensitive, whitespace-trimmed letter match. The feedback names
/// the full text of the correct option and repeats the stored explanation.
pub fn grade_multiple_choice(question: &QuizQuestion, user_answer: &str) -> Correction {
    let expected = question.correct_identifier.trim();
    let matched = user_answer.trim().eq_ignore_ascii_case(expected);

    let expected_letter = expected.chars().next();
    let correct_text = question
        .choices
        .iter()
        .find(|choice| match (choice.trim().chars().next(), expected_letter) {
            (Some(letter), Some(expected)) => letter.eq_ignore_ascii_case(&expected),
            _ => false,
        })
        .map(String::as_str)
        .unwrap_or(expected);

    let feedback = if matched {
        format!("Correct, the answer was {}. {}", correct_text, question.explanation)
    } else {
        format!(
            "The expected answer was {}. {}",
            correct_text, question.explanation
        )
    };

    Correction {
        score: matched as u8,
        feedback,
    }
}

/// Parse the strict `{"score": 0|1, "feedback": ...}` grading output
pub fn parse_correction(reply: &str) -> Result<Correction> {
    let body = strip_code_fences(reply);
    let correction: Correction =
        serde_json::from_str(&body).map_err(|e| anyhow!("not a grading verdict: {}", e))?;
    if correction.score > 1 {
        return Err(anyhow!("score {} is outside 0..=1", correction.score));
    }
    Ok(correction)
}
