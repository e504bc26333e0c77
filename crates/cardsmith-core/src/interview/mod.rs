//! Requirement interview: URL detection, slot extraction, the question bank
//! and the state machine that ties them together.

pub mod detector;
pub mod extract;
pub mod machine;
pub mod questions;
pub mod state;
