//! Blocking client for a local Ollama server.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::llm::{LlmError, NameSource, PLACE_PROMPT, UPGRADE_PROMPT, clean_response};

/// Where Ollama listens by default.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Generation can be slow on a cold model.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Attempts per name before giving up on empty answers.
const MAX_ATTEMPTS: usize = 3;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    name: String,
}

/// Whether an installed model tag satisfies a requested model name.
///
/// Ollama reports untagged models with an explicit `:latest` suffix.
fn model_matches(installed: &str, wanted: &str) -> bool {
    installed == wanted || installed.strip_suffix(":latest") == Some(wanted)
}

/// Talks to one model on an Ollama server.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    agent: ureq::Agent,
    base_url: String,
    model: String,
}

impl OllamaClient {
    /// Create a client for `model` on the server at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build();
        Self {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    /// The model this client generates with.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Names of the models installed on the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot be reached or answers garbage.
    pub fn available_models(&self) -> Result<Vec<String>, LlmError> {
        let url = self.url("/api/tags");
        let response = self.agent.get(&url).call().map_err(|e| LlmError::Http {
            url: url.clone(),
            source: Box::new(e),
        })?;
        let tags: TagsResponse = serde_json::from_reader(response.into_reader())?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    /// Check that the model has been pulled.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::ModelNotPulled`] if the server does not have it, or
    /// a transport error if the server cannot be reached.
    pub fn ensure_model(&self) -> Result<(), LlmError> {
        let installed = self.available_models()?;
        if installed.iter().any(|name| model_matches(name, &self.model)) {
            Ok(())
        } else {
            Err(LlmError::ModelNotPulled(self.model.clone()))
        }
    }

    /// Send a prompt and return the raw completion.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the answer is not JSON.
    pub fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let url = self.url("/api/generate");
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };
        let response = self.agent.post(&url).send_json(&request).map_err(|e| LlmError::Http {
            url: url.clone(),
            source: Box::new(e),
        })?;
        let answer: GenerateResponse = serde_json::from_reader(response.into_reader())?;
        Ok(answer.response)
    }

    fn name_from(&self, prompt: &str) -> Result<String, LlmError> {
        for _ in 0..MAX_ATTEMPTS {
            if let Some(name) = clean_response(&self.generate(prompt)?) {
                return Ok(name);
            }
        }
        Err(LlmError::EmptyResponse)
    }
}

impl NameSource for OllamaClient {
    fn upgrade_name(&mut self) -> Result<String, LlmError> {
        self.name_from(UPGRADE_PROMPT)
    }

    fn place_name(&mut self) -> Result<String, LlmError> {
        self.name_from(PLACE_PROMPT)
    }
}
