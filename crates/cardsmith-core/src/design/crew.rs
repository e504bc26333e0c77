//! Two-agent design crew.
//!
//! `DesignCrew` turns a [`BlueprintRequest`] into a card blueprint: an
//! optional background image search, then a Requirement Analyst call, then a
//! Copywriter & Layout Specialist call. The copywriter's text is parsed into
//! a JSON blueprint, locked assets are forced into `must_use`, and the HTML
//! preview and HTML prompt are derived from it. OTel GenAI spans instrument
//! every LLM call.

use std::future::Future;

use tracing::{Instrument, debug, info, info_span, warn};

use cardsmith_types::blueprint::{BackgroundPhoto, BlueprintOutcome, BlueprintRequest, GeneratedHtml};
use cardsmith_types::config::CrewConfig;
use cardsmith_types::error::DesignError;
use cardsmith_types::llm::{CompletionRequest, Message};

use crate::blueprint::html::blueprint_to_html;
use crate::blueprint::parse::{ensure_must_use, extract_html, parse_blueprint};
use crate::blueprint::prompt::build_card_html_prompt;
use crate::blueprint::request::to_summary_json;
use crate::imagery::ImageSearch;
use crate::llm::box_provider::BoxLlmProvider;

use super::prompt::{
    ANALYST_NAME, ANALYST_SYSTEM, COPYWRITER_NAME, COPYWRITER_SYSTEM, HTML_DESIGNER_NAME,
    HTML_DESIGNER_SYSTEM, analyst_task, copywriter_task, html_render_task,
};

/// The generative backend: one opaque call from request to blueprint.
pub trait BlueprintBackend: Send + Sync {
    fn generate(
        &self,
        request: &BlueprintRequest,
    ) -> impl Future<Output = Result<BlueprintOutcome, DesignError>> + Send;
}

/// LLM call settings shared by every agent in the crew.
#[derive(Debug, Clone, PartialEq)]
pub struct CrewOptions {
    /// Model name; empty means the provider's default.
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub inspiration_count: u32,
}

impl From<&CrewConfig> for CrewOptions {
    fn from(config: &CrewConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            inspiration_count: config.inspiration_count,
        }
    }
}

impl Default for CrewOptions {
    fn default() -> Self {
        Self::from(&CrewConfig::default())
    }
}

/// Sequential analyst + copywriter crew backed by an LLM provider.
///
/// `search` is `None` when background inspiration is disabled.
pub struct DesignCrew<S: ImageSearch> {
    provider: BoxLlmProvider,
    search: Option<S>,
    options: CrewOptions,
}

impl<S: ImageSearch> DesignCrew<S> {
    pub fn new(provider: BoxLlmProvider, search: Option<S>, options: CrewOptions) -> Self {
        Self {
            provider,
            search,
            options,
        }
    }

    pub fn options(&self) -> &CrewOptions {
        &self.options
    }

    /// Background photos for `query`.
    ///
    /// Search failures are not fatal: the error text is returned alongside an
    /// empty list so generation can continue.
    pub async fn gather_inspirations(&self, query: &str) -> (Vec<BackgroundPhoto>, Option<String>) {
        let Some(search) = &self.search else {
            debug!("inspiration search disabled");
            return (Vec::new(), None);
        };

        match search.search(query, self.options.inspiration_count).await {
            Ok(photos) => {
                info!(
                    backend = search.name(),
                    query,
                    count = photos.len(),
                    "gathered background inspirations"
                );
                (photos, None)
            }
            Err(e) => {
                warn!(backend = search.name(), query, error = %e, "inspiration search failed");
                (Vec::new(), Some(e.to_string()))
            }
        }
    }

    /// Ask the LLM to turn an HTML prompt into a finished card document.
    pub async fn render_html(&self, html_prompt: &str) -> Result<GeneratedHtml, DesignError> {
        let raw = self
            .run_agent(HTML_DESIGNER_NAME, HTML_DESIGNER_SYSTEM, html_render_task(html_prompt))
            .await?;
        let html = extract_html(&raw);
        if html.is_none() {
            warn!("LLM response held no HTML document");
        }
        Ok(GeneratedHtml { html, raw })
    }

    fn build_request(&self, system: &str, task: String) -> CompletionRequest {
        let model = if self.options.model.is_empty() {
            self.provider.default_model().to_string()
        } else {
            self.options.model.clone()
        };
        CompletionRequest {
            model,
            messages: vec![Message::user(task)],
            system: Some(system.to_string()),
            max_tokens: self.options.max_tokens,
            temperature: Some(self.options.temperature),
        }
    }

    async fn run_agent(&self, agent: &str, system: &str, task: String) -> Result<String, DesignError> {
        let request = self.build_request(system, task);

        let span = info_span!(
            "gen_ai.complete",
            gen_ai.system = self.provider.name(),
            gen_ai.agent.name = agent,
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = request.max_tokens,
            gen_ai.request.temperature = ?request.temperature,
        );

        let response = self.provider.complete(&request).instrument(span).await?;
        debug!(
            agent,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            stop_reason = %response.stop_reason,
            "agent finished"
        );
        Ok(response.content)
    }
}

impl<S: ImageSearch> BlueprintBackend for DesignCrew<S> {
    async fn generate(&self, request: &BlueprintRequest) -> Result<BlueprintOutcome, DesignError> {
        let (inspirations, inspiration_error) =
            self.gather_inspirations(&request.background_query).await;

        let summary = to_summary_json(request, &inspirations);
        let requirements = serde_json::to_string_pretty(&summary)
            .map_err(|e| DesignError::Serialization(e.to_string()))?;

        let analysis = self
            .run_agent(ANALYST_NAME, ANALYST_SYSTEM, analyst_task(&requirements))
            .await?;
        let raw_output = self
            .run_agent(
                COPYWRITER_NAME,
                COPYWRITER_SYSTEM,
                copywriter_task(&requirements, &analysis, &request.locked_assets),
            )
            .await?;

        let mut blueprint = parse_blueprint(&raw_output);
        match blueprint.as_mut() {
            Some(parsed) => {
                let added = ensure_must_use(parsed, &request.locked_assets);
                if !added.is_empty() {
                    info!(count = added.len(), "added missing locked assets to must_use");
                }
            }
            None => warn!("copywriter output held no JSON object"),
        }

        Ok(BlueprintOutcome {
            html_preview: blueprint.as_ref().map(blueprint_to_html),
            html_prompt: blueprint.as_ref().map(build_card_html_prompt),
            raw_output,
            blueprint,
            inspirations,
            inspiration_error,
        })
    }
}
