//! Quiz domain state

use crate::QuizEngine;

#[derive(Clone)]
pub struct QuizState {
    pub engine: QuizEngine,
}
