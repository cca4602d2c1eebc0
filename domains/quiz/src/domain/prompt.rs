//! Prompt construction for quiz turns
//!
//! Every turn uses the same template: the full note corpus plus the full
//! conversation so far. There is no separate "start of quiz" prompt; an empty
//! history simply renders as an empty block.

use flashquiz_llm::CompletionRequest;

use super::entities::Message;
use crate::QuizConfig;

pub const SYSTEM_INSTRUCTION: &str = "\
You are a friendly quiz master helping a student review their own study notes.

Rules:
1. Ask exactly one question at a time. Every question must be answerable from the notes alone.
2. When the student replies to a question, decide whether their answer is correct.
3. If the answer is correct, congratulate them briefly and then ask a new question that is different from every question already asked.
4. If the answer is incorrect, correct them gently with a short explanation and then ask a new question that is different from every question already asked.
5. If the student asks you something instead of answering (about the quiz, a question, or the material), answer that first and then resume the quiz.
6. Stay on the topics covered by the notes. Do not bring in unrelated subjects.
7. Once every topic in the notes has been covered, stop asking new questions and let the student know the review is complete.
8. Keep an encouraging tone throughout.";

const USER_PROMPT_TEMPLATE: &str = "\
Here are my notes:

{notes}

Here is our conversation so far:

{history}

Write the quiz master's next message.";

/// Note contents joined by newlines, in the order given
pub fn render_notes(notes: &[String]) -> String {
    notes.join("\n")
}

/// One `role: content` line per message, in conversation order
pub fn render_history(conversation: &[Message]) -> String {
    conversation
        .iter()
        .map(|m| format!("{}: {}", m.role, m.content))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn user_prompt(notes: &[String], conversation: &[Message]) -> String {
    // History goes in last so braces inside note text are never re-scanned
    USER_PROMPT_TEMPLATE
        .replacen("{notes}", &render_notes(notes), 1)
        .replacen("{history}", &render_history(conversation), 1)
}

/// Build the model request for one turn
pub fn completion_request(
    notes: &[String],
    conversation: &[Message],
    config: &QuizConfig,
) -> CompletionRequest {
    let mut request = CompletionRequest::single_turn(
        SYSTEM_INSTRUCTION,
        user_prompt(notes, conversation),
    )
    .with_temperature(config.temperature);

    if let Some(model) = &config.model {
        request = request.with_model(model.clone());
    }
    request.max_tokens = config.max_tokens;
    request
}
