//! Blueprint request building and blueprint post-processing.
//!
//! - `request`: interview state to `BlueprintRequest`, plus the JSON summary
//!   handed to the design crew
//! - `parse`: JSON and HTML recovery from LLM text, must-use enforcement
//! - `html`: static HTML preview of a blueprint
//! - `prompt`: instructions for an LLM to render the final HTML card

pub mod html;
pub mod parse;
pub mod prompt;
pub mod request;
pub mod value;
