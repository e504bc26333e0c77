//! Shared domain types for Cardsmith.
//!
//! This crate contains the core domain types used across the Cardsmith
//! workspace: interview slots and state, locked image assets, blueprint
//! requests and outcomes, LLM request/response shapes, crew configuration,
//! and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, thiserror.

pub mod blueprint;
pub mod config;
pub mod error;
pub mod interview;
pub mod llm;
