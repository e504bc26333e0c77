//! Main chat loop orchestration.
//!
//! Coordinates one card session: settings and credential checks, provider
//! and image search setup, welcome banner, the requirement interview,
//! confirmation, blueprint generation with manual retry, the optional final
//! HTML render, and output.

use std::time::{Duration, Instant};

use anyhow::Context;
use console::style;
use dialoguer::{Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};
use secrecy::{ExposeSecret, SecretString};
use tracing::{info, warn};

use cardsmith_core::design::crew::{BlueprintBackend, CrewOptions, DesignCrew};
use cardsmith_core::interview::machine::InterviewMachine;
use cardsmith_infra::config::{load_settings, resolve_data_dir};
use cardsmith_infra::llm::create_provider;
use cardsmith_infra::pexels::PexelsClient;
use cardsmith_types::blueprint::{BlueprintOutcome, BlueprintRequest, GeneratedHtml};

use crate::cli::ChatArgs;

use super::banner::print_welcome_banner;
use super::interview::run_interview;
use super::renderer;

fn reveal_copy(secret: &SecretString) -> SecretString {
    SecretString::from(secret.expose_secret().to_owned())
}

fn spinner(message: &str) -> anyhow::Result<ProgressBar> {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .context("invalid spinner template")?,
    );
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(80));
    Ok(bar)
}

/// Run the interactive card session.
pub async fn run_chat(args: ChatArgs, json: bool) -> anyhow::Result<()> {
    let data_dir = resolve_data_dir();
    let mut settings = load_settings(&data_dir)
        .await
        .context("failed to load configuration")?;

    if let Some(provider) = args.provider {
        settings.crew.provider = provider;
    }
    if let Some(model) = args.model.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
        settings.crew.model = model.to_string();
    }

    let inspiration = !args.no_inspiration;
    settings
        .validate(inspiration)
        .context("configuration is incomplete")?;

    let provider = create_provider(&settings.crew, reveal_copy(settings.llm_api_key()?));
    let search = match (&settings.pexels_api_key, inspiration) {
        (Some(key), true) => Some(PexelsClient::new(reveal_copy(key)).context("failed to build Pexels client")?),
        _ => None,
    };
    let crew = DesignCrew::new(provider, search, CrewOptions::from(&settings.crew));

    let mut machine = InterviewMachine::new();
    let session_id = machine.state().session_id.to_string();
    let greeting = machine.welcome().unwrap_or_default();
    print_welcome_banner(
        &greeting,
        &settings.crew.provider.to_string(),
        &settings.crew.model,
        &session_id,
    );
    info!(session_id = %session_id, provider = %settings.crew.provider, "card session started");

    let request = run_interview(&mut machine, || {
        Input::<String>::new()
            .with_prompt("Your answer")
            .allow_empty(true)
            .interact_text()
            .context("failed to read answer")
    })?;

    renderer::print_summary(&machine.summary());

    if !args.yes {
        let proceed = Confirm::new()
            .with_prompt("Generate the card blueprint now?")
            .default(true)
            .interact()
            .context("failed to read confirmation")?;
        if !proceed {
            println!("  {}", style("No problem. Nothing was generated.").dim());
            return Ok(());
        }
    }

    let outcome = generate_with_retry(&crew, &request).await?;

    let generated = if args.render_html {
        render_final_html(&crew, &outcome).await?
    } else {
        None
    };

    if json {
        let doc = renderer::outcome_document(&request, &outcome, generated.as_ref());
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        renderer::print_outcome(&outcome, generated.as_ref());
    }

    if let Some(path) = &args.html_out {
        match renderer::html_to_save(&outcome, generated.as_ref()) {
            Some(html) => {
                tokio::fs::write(path, html)
                    .await
                    .with_context(|| format!("failed to write {}", path.display()))?;
                eprintln!(
                    "  {} Card HTML written to {}",
                    style("✓").green().bold(),
                    style(path.display()).underlined()
                );
            }
            None => warn!(path = %path.display(), "no HTML available to write"),
        }
    }

    Ok(())
}

/// Generate the blueprint, offering a manual retry after each failure.
async fn generate_with_retry<B: BlueprintBackend>(
    backend: &B,
    request: &BlueprintRequest,
) -> anyhow::Result<BlueprintOutcome> {
    loop {
        let bar = spinner("Designing your card...")?;
        let started = Instant::now();
        let result = backend.generate(request).await;
        bar.finish_and_clear();

        match result {
            Ok(outcome) => {
                info!(
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    parsed = outcome.blueprint.is_some(),
                    "blueprint generated"
                );
                return Ok(outcome);
            }
            Err(e) => {
                eprintln!("\n  {} Generation failed: {e}", style("✗").red().bold());
                let retry = Confirm::new()
                    .with_prompt("Try again?")
                    .default(true)
                    .interact()
                    .context("failed to read retry confirmation")?;
                if !retry {
                    return Err(e).context("blueprint generation failed");
                }
            }
        }
    }
}

/// Ask the LLM for a finished HTML document. Failure is reported and
/// swallowed; the preview is still available.
async fn render_final_html<S>(
    crew: &DesignCrew<S>,
    outcome: &BlueprintOutcome,
) -> anyhow::Result<Option<GeneratedHtml>>
where
    S: cardsmith_core::imagery::ImageSearch,
{
    let Some(prompt) = &outcome.html_prompt else {
        eprintln!(
            "  {} No blueprint to render, skipping the final HTML.",
            style("!").yellow().bold()
        );
        return Ok(None);
    };

    let bar = spinner("Rendering the final HTML...")?;
    let result = crew.render_html(prompt).await;
    bar.finish_and_clear();

    match result {
        Ok(generated) => Ok(Some(generated)),
        Err(e) => {
            warn!(error = %e, "final HTML render failed");
            eprintln!("\n  {} Final HTML render failed: {e}", style("!").yellow().bold());
            Ok(None)
        }
    }
}
