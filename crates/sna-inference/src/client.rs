//! Transport for the hosted inference API
//!
//! Every facility posts `{"inputs", "parameters", "options"}` to
//! `{endpoint}/{model_id}` and decodes a task-specific JSON response.
//!
//! Author: hephaex@gmail.com

use std::time::Duration;

use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use sna_core::{InferenceConfig, Result, SnaError};

/// Per-request options understood by the inference API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestOptions {
    /// Wait for a cold model to load instead of returning 503
    pub wait_for_model: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            wait_for_model: true,
        }
    }
}

/// Options as sent on the wire; inference is always pinned to CPU
#[derive(Debug, Serialize)]
pub(crate) struct WireOptions {
    wait_for_model: bool,
    use_gpu: bool,
}

impl From<RequestOptions> for WireOptions {
    fn from(options: RequestOptions) -> Self {
        Self {
            wait_for_model: options.wait_for_model,
            use_gpu: false,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct InferenceRequest<'a, I: Serialize, P: Serialize> {
    pub inputs: I,
    pub parameters: &'a P,
    pub options: WireOptions,
}

/// Shared HTTP client for all inference facilities
#[derive(Debug, Clone)]
pub struct HfClient {
    client: Client,
    endpoint: String,
    api_token: Option<String>,
    options: RequestOptions,
}

impl HfClient {
    /// Create a new client with default options
    pub fn new(endpoint: impl Into<String>, api_token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_token,
            options: RequestOptions::default(),
        }
    }

    /// Create from config
    pub fn from_config(config: &InferenceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SnaError::Inference(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_token: config.api_token.clone(),
            options: RequestOptions {
                wait_for_model: config.wait_for_model,
            },
        })
    }

    /// Override request options
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> RequestOptions {
        self.options
    }

    /// URL for a model id
    pub fn model_url(&self, model_id: &str) -> String {
        format!(
            "{}/{}",
            self.endpoint.trim_end_matches('/'),
            model_id.trim_start_matches('/')
        )
    }

    /// Post one inference request and decode the response
    pub(crate) async fn infer<I, P, R>(&self, model_id: &str, inputs: I, parameters: &P) -> Result<R>
    where
        I: Serialize + Send,
        P: Serialize + Sync,
        R: DeserializeOwned,
    {
        let request = InferenceRequest {
            inputs,
            parameters,
            options: self.options.into(),
        };

        let mut builder = self
            .client
            .post(self.model_url(model_id))
            .header("Content-Type", "application/json")
            .json(&request);
        if let Some(token) = &self.api_token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }

        let response = builder
            .send()
            .await
            .map_err(|e| SnaError::Inference(format!("{model_id}: request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SnaError::Inference(format!(
                "{model_id} returned {status}: {error_text}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| SnaError::Inference(format!("{model_id}: failed to parse response: {e}")))
    }
}
