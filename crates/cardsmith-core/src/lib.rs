//! Business logic and port definitions for Cardsmith.
//!
//! This crate holds the requirement interview, blueprint building and the
//! design crew. It defines the ports (`LlmProvider`, `ImageSearch`) that the
//! infrastructure layer implements and depends only on `cardsmith-types` --
//! never on `cardsmith-infra` or any HTTP crate.

pub mod blueprint;
pub mod design;
pub mod imagery;
pub mod interview;
pub mod llm;
