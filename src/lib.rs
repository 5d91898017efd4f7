//! Core engine for the Splinter AI tutor.
//!
//! The crate holds everything below the UI: the conversation history and
//! its transmission-payload transform, the tutor dialogue component, the
//! quiz state machine, and quiz generation/grading against a Groq
//! chat-completions endpoint. UI rendering, file uploads, and text
//! extraction live in the embedding application and feed plain data
//! (context strings, base64 images, model identifiers) into this crate.

pub mod config;
pub mod groq;
pub mod history;
pub mod message;
pub mod models;
pub mod prompts;
pub mod quiz;
pub mod tutor;

// Re-export main types for convenience
pub use config::Config;
pub use groq::{ChatCompletion, CompletionRequest, GroqClient};
pub use history::Conversation;
pub use message::{ChatMessage, ChatRole, ContentPart, ImageUrl, MessageContent};
pub use quiz::generate::{generate_quiz, GenerationReport, QuizParams};
pub use quiz::grade::{Grader, ModelGrader};
pub use quiz::{AnswerRecord, Correction, QuestionKind, QuizQuestion, QuizSession, QuizState};
pub use tutor::{ImageAttachment, Tutor};
