//! Gemini client module
//!
//! Provides `GeminiClient` for making generateContent requests against the
//! Google Generative Language API. The API key travels as a query parameter,
//! matching what the REST surface expects.

use crate::error::{Error, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Client for the Gemini generateContent API.
///
/// # Example
/// ```no_run
/// use dataprov::client::GeminiClient;
///
/// # async fn example() -> dataprov::error::Result<()> {
/// let client = GeminiClient::try_new("my-api-key", None)?;
/// let text = client.generate("Say hello").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct GeminiClient {
    client: Client,
    base: Url,
    api_key: String,
    model: String,
}

/// One entry from the model listing, reduced to what the CLI reports.
#[derive(Clone, Debug, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    #[serde(rename = "displayName", default)]
    pub display_name: String,
    #[serde(rename = "supportedGenerationMethods", default)]
    pub supported_generation_methods: Vec<String>,
}

impl ModelInfo {
    pub fn supports_generation(&self) -> bool {
        self.supported_generation_methods
            .iter()
            .any(|m| m == "generateContent")
    }
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Deserialize)]
struct ModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

impl GeminiClient {
    /// Create a new GeminiClient from an API key and optional model override.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built or the base URL
    /// is invalid.
    pub fn try_new(api_key: impl Into<String>, model: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| Error::ExternalService(e.to_string()))?;
        let base = Url::parse(API_BASE).map_err(|e| Error::ExternalService(e.to_string()))?;
        Ok(Self {
            client,
            base,
            api_key: api_key.into(),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one prompt and return the first candidate's text.
    ///
    /// # Errors
    /// Returns [`Error::ExternalService`] on transport failures, non-success
    /// status codes, or a response with no candidates.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let mut url = self
            .base
            .join(&format!("models/{}:generateContent", self.model))
            .map_err(|e| Error::ExternalService(e.to_string()))?;
        url.query_pairs_mut().append_pair("key", &self.api_key);

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        log::debug!("Requesting generation from model '{}'", self.model);
        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::ExternalService(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(Error::ExternalService(format!(
                "generateContent returned {status}: {detail}"
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::ExternalService(e.to_string()))?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| {
                Error::ExternalService("response contained no candidates".to_string())
            })?;

        Ok(text)
    }

    /// List models that support generateContent.
    ///
    /// # Errors
    /// Returns [`Error::ExternalService`] on transport failures or
    /// non-success status codes.
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        let mut url = self
            .base
            .join("models")
            .map_err(|e| Error::ExternalService(e.to_string()))?;
        url.query_pairs_mut().append_pair("key", &self.api_key);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::ExternalService(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(Error::ExternalService(format!(
                "model listing returned {status}: {detail}"
            )));
        }

        let parsed: ModelsResponse = response
            .json()
            .await
            .map_err(|e| Error::ExternalService(e.to_string()))?;

        Ok(parsed
            .models
            .into_iter()
            .filter(ModelInfo::supports_generation)
            .collect())
    }
}
