//! Completion provider seam
//!
//! The relay never talks to a model directly; sessions and the quiz
//! endpoint go through `CompletionProvider`, with `OpenAiProvider` as the
//! production implementation.

mod openai;
mod provider;
mod quiz;

pub use openai::OpenAiProvider;
pub use provider::{
    complete_within, ChatMessage, CompletionProvider, CompletionRequest, ResponseFormat,
};
pub use quiz::{generate_quiz, Quiz, QuizSettings};
