//! Prompt templates for the tutor persona, quiz generation, and grading.

use crate::quiz::QuizQuestion;

pub const TUTOR_PERSONA: &str = "You are Splinter, a wise and patient tutor.";
pub const QUIZ_PERSONA: &str =
    "You are an expert professor who writes rigorous quizzes and replies only with valid JSON.";

/// Hard character cap applied to course material in chat prompts
pub const CHAT_CONTEXT_BUDGET: usize = 25_000;
/// Hard character cap applied to course material in quiz generation prompts
pub const QUIZ_CONTEXT_BUDGET: usize = 20_000;

/// Truncate to a character budget without splitting a UTF-8 boundary
pub fn truncate_chars(text: &str, budget: usize) -> &str {
    match text.char_indices().nth(budget) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

/// System prompt for the tutor dialogue, with an optional course excerpt
pub fn system_prompt(course_context: &str) -> String {
    if course_context.is_empty() {
        return TUTOR_PERSONA.to_string();
    }
    format!(
        "{} Use the course material below to answer.\n\n--- COURSE ---\n{}",
        TUTOR_PERSONA,
        truncate_chars(course_context, CHAT_CONTEXT_BUDGET)
    )
}

/// Generation prompt demanding an exact count of questions in the mandated
/// JSON schema
pub fn quiz_generation_prompt(
    topic: &str,
    difficulty: &str,
    question_count: usize,
    context: &str,
) -> String {
    let mut prompt = String::new();

    prompt.push_str(&format!(
        "Topic: \"{}\". Level: {}.\n\
         Goal: generate EXACTLY {} questions.\n",
        topic, difficulty, question_count
    ));

    if !context.is_empty() {
        prompt.push_str("Base your questions EXCLUSIVELY on this course material:\n");
        prompt.push_str(truncate_chars(context, QUIZ_CONTEXT_BUDGET));
        prompt.push('\n');
    }

    prompt.push_str(&format!(
        "\nINSTRUCTIONS:\n\
         1. Generate {} varied questions, mixing multiple-choice (\"qcm\") and open questions.\n\
         2. If the material is short, ask about precise details.\n\
         \n\
         Reply ONLY with a valid JSON array. Each element must have the keys\n\
         \"type\" (\"qcm\" or \"open\"), \"question\", \"explanation\" and\n\
         \"correct_identifier\". For \"qcm\" questions, \"correct_identifier\" is the\n\
         letter of the right option and \"choices\" is an array of exactly 4 strings,\n\
         each prefixed with its letter, like this:\n\
         [\n\
           {{\n\
             \"type\": \"qcm\",\n\
             \"question\": \"The statement?\",\n\
             \"explanation\": \"Why it is right\",\n\
             \"correct_identifier\": \"B\",\n\
             \"choices\": [\"A) ...\", \"B) ...\", \"C) ...\", \"D) ...\"]\n\
           }},\n\
           {{\n\
             \"type\": \"open\",\n\
             \"question\": \"The statement?\",\n\
             \"explanation\": \"Why it is right\",\n\
             \"correct_identifier\": \"The full reference answer\"\n\
           }}\n\
         ]\n",
        question_count
    ));

    prompt
}

/// Grading prompt for open questions, with a lenient scoring criterion
pub fn grading_prompt(question: &QuizQuestion, user_answer: &str) -> String {
    let mut prompt = String::new();

    prompt.push_str("Grade the student's answer to the question below.\n\n");
    prompt.push_str(&format!("Question: {}\n", question.question));
    prompt.push_str(&format!(
        "Reference answer: {}\n",
        question.correct_identifier
    ));
    prompt.push_str(&format!("Explanation: {}\n", question.explanation));
    prompt.push_str(&format!("Student answer: {}\n\n", user_answer));
    prompt.push_str(
        "Be lenient: if the answer mentions at least one materially correct element, \
         the score is 1; otherwise it is 0.\n\
         Reply ONLY with strict JSON: {\"score\": 0 or 1, \"feedback\": \"one or two \
         sentences addressed to the student\"}\n",
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{QuestionKind, QuizQuestion};

    #[test]
    fn test_truncate_chars_respects_utf8_boundaries() {
        let text = "héllo wörld";
        assert_eq!(truncate_chars(text, 4), "héll");
        assert_eq!(truncate_chars(text, 100), text);
    }

    #[test]
    fn test_system_prompt_without_context_is_the_bare_persona() {
        assert_eq!(system_prompt(""), TUTOR_PERSONA);
    }

    #[test]
    fn test_system_prompt_embeds_and_caps_course_context() {
        let context = "x".repeat(CHAT_CONTEXT_BUDGET + 50);
        let prompt = system_prompt(&context);
        assert!(prompt.starts_with(TUTOR_PERSONA));
        assert!(prompt.contains("--- COURSE ---"));
        // Hard cap, no summarization
        let embedded_len = prompt.chars().filter(|c| *c == 'x').count();
        assert_eq!(embedded_len, CHAT_CONTEXT_BUDGET);
    }

    #[test]
    fn test_generation_prompt_names_count_topic_and_schema() {
        let prompt = quiz_generation_prompt("The French Revolution", "Expert", 5, "");
        assert!(prompt.contains("EXACTLY 5 questions"));
        assert!(prompt.contains("The French Revolution"));
        assert!(prompt.contains("\"correct_identifier\""));
        assert!(!prompt.contains("EXCLUSIVELY"));

        let grounded = quiz_generation_prompt("t", "d", 3, "course text");
        assert!(grounded.contains("EXCLUSIVELY"));
        assert!(grounded.contains("course text"));
    }

    #[test]
    fn test_grading_prompt_carries_reference_answer_and_contract() {
        let question = QuizQuestion {
            kind: QuestionKind::Open,
            question: "Why is the sky blue?".to_string(),
            explanation: "Rayleigh scattering.".to_string(),
            correct_identifier: "Because shorter wavelengths scatter more.".to_string(),
            choices: Vec::new(),
        };
        let prompt = grading_prompt(&question, "scattering of light");
        assert!(prompt.contains("Why is the sky blue?"));
        assert!(prompt.contains("Because shorter wavelengths scatter more."));
        assert!(prompt.contains("scattering of light"));
        assert!(prompt.contains("{\"score\": 0 or 1"));
    }
}
