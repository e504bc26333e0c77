//! Terminal driver for the requirement interview.
//!
//! All decisions live in [`InterviewMachine`]; this module only prints the
//! questions and feedback and reads answers.

use anyhow::{Result, bail};
use console::style;

use cardsmith_core::interview::machine::{InterviewMachine, TurnOutcome};
use cardsmith_types::blueprint::BlueprintRequest;
use cardsmith_types::interview::SlotName;

/// Ask questions until the user completes the interview.
///
/// `read_answer` supplies one user utterance per call.
pub fn run_interview<F>(machine: &mut InterviewMachine, mut read_answer: F) -> Result<BlueprintRequest>
where
    F: FnMut() -> Result<String>,
{
    let mut question = machine.next_question();

    loop {
        match &question {
            Some(text) => println!("\n{}", style(text).cyan().bold()),
            None => println!("\n{}", style(machine.completion_prompt()).dim()),
        }

        let answer = read_answer()?;

        match machine.ingest(&answer) {
            TurnOutcome::Ignored => {}

            TurnOutcome::Recorded {
                inferred,
                locked,
                advanced,
                ..
            } => {
                print_locked(&locked);
                if !inferred.is_empty() {
                    println!(
                        "  {} Also noted: {}",
                        style("i").blue().bold(),
                        style(labels(&inferred)).dim()
                    );
                }
                if advanced {
                    println!(
                        "\n  {} Core details captured. A few optional questions follow; type 'done' any time.",
                        style("✓").green().bold()
                    );
                }
                // A URL-only answer leaves the current question open.
                if machine.state().active_question.is_none() {
                    question = machine.next_question();
                }
            }

            TurnOutcome::PrematureCompletion {
                missing,
                question: reask,
            } => {
                println!(
                    "\n  {} Still missing: {}. Please share these first.",
                    style("!").red().bold(),
                    style(labels(&missing)).red()
                );
                question = Some(reask);
            }

            TurnOutcome::Ready(request) => {
                println!(
                    "\n  {} Great! I'll design the card from the details so far.",
                    style("*").green().bold()
                );
                return Ok(request);
            }

            TurnOutcome::AlreadyReady { .. } => bail!("the interview has already finished"),
        }
    }
}

fn print_locked(locked: &[String]) {
    for url in locked {
        println!(
            "  {} Locked image for the design: {}",
            style("📎").bold(),
            style(url).underlined()
        );
    }
}

fn labels(slots: &[SlotName]) -> String {
    slots
        .iter()
        .map(|slot| slot.label())
        .collect::<Vec<_>>()
        .join(", ")
}
