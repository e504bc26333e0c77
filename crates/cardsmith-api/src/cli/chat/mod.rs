//! Interactive card design chat for Cardsmith.
//!
//! Runs the requirement interview in the terminal, then hands the finished
//! request to the design crew and renders the blueprint, previews and
//! inspirations. Entry point: `loop_runner::run_chat`.

pub mod banner;
pub mod interview;
pub mod loop_runner;
pub mod renderer;
