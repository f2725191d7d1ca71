//! Abstractive summarization facility

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sna_core::{Result, SnaError, SummaryBounds, SummaryResult, Summarizer};

use crate::client::HfClient;

#[derive(Debug, Serialize)]
struct SummarizationParameters {
    min_length: u32,
    max_length: u32,
    do_sample: bool,
}

#[derive(Debug, Deserialize)]
struct SummarizationOutput {
    summary_text: String,
}

/// Summarizer backed by a hosted seq2seq model
pub struct HfSummarizer {
    client: HfClient,
    model: String,
}

impl HfSummarizer {
    pub fn new(client: HfClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl Summarizer for HfSummarizer {
    async fn summarize(&self, text: &str, bounds: SummaryBounds) -> Result<SummaryResult> {
        // Greedy decoding only
        let parameters = SummarizationParameters {
            min_length: bounds.min_length,
            max_length: bounds.max_length,
            do_sample: false,
        };

        let outputs: Vec<SummarizationOutput> =
            self.client.infer(&self.model, text, &parameters).await?;

        outputs
            .into_iter()
            .next()
            .map(|o| SummaryResult {
                text: o.summary_text,
            })
            .ok_or_else(|| SnaError::Inference(format!("{}: no summary returned", self.model)))
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameters_are_greedy() {
        let parameters = SummarizationParameters {
            min_length: 20,
            max_length: 50,
            do_sample: false,
        };
        let value = serde_json::to_value(&parameters).unwrap();
        assert_eq!(value["min_length"], 20);
        assert_eq!(value["max_length"], 50);
        assert_eq!(value["do_sample"], false);
    }

    #[test]
    fn test_parse_output() {
        let outputs: Vec<SummarizationOutput> =
            serde_json::from_str(r#"[{"summary_text": "A short summary."}]"#).unwrap();
        assert_eq!(outputs[0].summary_text, "A short summary.");
    }
}
