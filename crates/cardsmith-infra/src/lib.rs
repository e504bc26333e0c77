//! Infrastructure layer for Cardsmith.
//!
//! Contains implementations of the ports defined in `cardsmith-core`: the
//! OpenAI-compatible LLM provider (OpenAI, SambaNova), the Pexels image
//! search client, and the settings loader (config file, environment, API keys).

pub mod config;
pub mod llm;
pub mod pexels;
