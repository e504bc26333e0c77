pub mod crew;
pub mod prompt;
