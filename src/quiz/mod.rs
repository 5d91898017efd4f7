//! Quiz session: question list, answer records, and the finite state
//! machine driving a revision cycle.

pub mod generate;
pub mod grade;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::quiz::grade::Grader;

/// Where a quiz session currently stands.
///
/// Transitions are strictly sequential:
/// start -> generating -> questioning (xN) -> final_review -> finished,
/// with delete returning to start from anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuizState {
    #[default]
    Start,
    Generating,
    Questioning,
    FinalReview,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionKind {
    #[serde(rename = "open")]
    Open,
    #[serde(rename = "qcm")]
    MultipleChoice,
}

/// One generated quiz item, immutable once installed.
///
/// `correct_identifier` is the option letter for multiple-choice questions
/// and the full reference answer for open ones. `choices` carries exactly
/// 4 lettered options for multiple-choice questions and stays empty for
/// open ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub question: String,
    pub explanation: String,
    pub correct_identifier: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
}

/// Grading verdict for one answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correction {
    pub score: u8,
    pub feedback: String,
}

/// One submitted answer; `correction` stays empty until final grading
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerRecord {
    pub question: QuizQuestion,
    pub user_answer: String,
    pub correction: Option<Correction>,
}

/// Single active quiz per user session
#[derive(Debug, Default)]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    current_index: usize,
    records: Vec<AnswerRecord>,
    score: u32,
    state: QuizState,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn records(&self) -> &[AnswerRecord] {
        &self.records
    }

    /// The question currently displayed, or None when the index is out of
    /// range
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.current_index)
    }

    /// start -> generating; no session data is touched yet
    pub fn begin_generating(&mut self) -> Result<()> {
        if self.state != QuizState::Start {
            return Err(anyhow!(
                "a quiz can only be generated from the start state"
            ));
        }
        self.state = QuizState::Generating;
        Ok(())
    }

    /// generating -> questioning; installs the question list and resets
    /// index, score, and records. An empty list is rejected and rolls the
    /// session back to start.
    pub fn install_questions(&mut self, questions: Vec<QuizQuestion>) -> Result<()> {
        if self.state != QuizState::Generating {
            return Err(anyhow!("no quiz generation is in flight"));
        }
        if questions.is_empty() {
            self.state = QuizState::Start;
            return Err(anyhow!("generation produced no questions"));
        }
        self.questions = questions;
        self.current_index = 0;
        self.score = 0;
        self.records.clear();
        self.state = QuizState::Questioning;
        Ok(())
    }

    /// generating -> start after a request or parse failure; session data
    /// is unchanged
    pub fn fail_generation(&mut self) {
        if self.state == QuizState::Generating {
            self.state = QuizState::Start;
        }
    }

    /// Record the submitted answer and advance. On the last question the
    /// index holds and the state moves to final_review instead. A blank
    /// answer is rejected with the state unchanged; the caller re-prompts.
    pub fn record_answer_and_advance(&mut self, user_answer: &str) -> Result<()> {
        if self.state != QuizState::Questioning {
            return Err(anyhow!("no question is awaiting an answer"));
        }
        if user_answer.trim().is_empty() {
            return Err(anyhow!("the answer must not be empty"));
        }
        let question = self
            .current_question()
            .cloned()
            .ok_or_else(|| anyhow!("no question at index {}", self.current_index))?;

        self.records.push(AnswerRecord {
            question,
            user_answer: user_answer.to_string(),
            correction: None,
        });

        if self.current_index < self.questions.len() - 1 {
            self.current_index += 1;
        } else {
            self.state = QuizState::FinalReview;
        }
        Ok(())
    }

    /// final_review -> finished: grade every record in order and accumulate
    /// the score. Re-invocation from finished regrades everything from
    /// scratch, since open-question grading is non-deterministic per call.
    pub async fn finalize<G: Grader + ?Sized>(&mut self, grader: &G) -> Result<()> {
        if self.state != QuizState::FinalReview && self.state != QuizState::Finished {
            return Err(anyhow!("all answers must be collected before grading"));
        }
        self.score = 0;
        for record in &mut self.records {
            let correction = grader.grade(&record.question, &record.user_answer).await;
            self.score += u32::from(correction.score);
            record.correction = Some(correction);
        }
        self.state = QuizState::Finished;
        Ok(())
    }

    /// Clear all quiz fields and return to start
    pub fn delete(&mut self) {
        *self = Self::default();
    }
}
