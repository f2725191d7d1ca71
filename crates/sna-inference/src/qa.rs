//! Extractive question answering facility

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sna_core::{QaAnswer, QuestionAnswerer, Result, SnaError};

use crate::client::HfClient;

#[derive(Debug, Serialize)]
struct QaInputs<'a> {
    question: &'a str,
    context: &'a str,
}

#[derive(Debug, Serialize)]
struct QaParameters {}

#[derive(Debug, Deserialize)]
struct QaOutput {
    answer: String,
    score: f32,
    #[serde(default)]
    start: Option<usize>,
    #[serde(default)]
    end: Option<usize>,
}

/// Some deployments wrap the single best answer in a list
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum QaResponse {
    Single(QaOutput),
    Ranked(Vec<QaOutput>),
}

impl QaResponse {
    fn best(self) -> Option<QaOutput> {
        match self {
            Self::Single(output) => Some(output),
            Self::Ranked(outputs) => outputs.into_iter().next(),
        }
    }
}

/// Question answerer backed by a hosted extractive QA model
pub struct HfQuestionAnswerer {
    client: HfClient,
    model: String,
}

impl HfQuestionAnswerer {
    pub fn new(client: HfClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl QuestionAnswerer for HfQuestionAnswerer {
    async fn answer(&self, context: &str, question: &str) -> Result<QaAnswer> {
        let inputs = QaInputs { question, context };

        let response: QaResponse = self
            .client
            .infer(&self.model, inputs, &QaParameters {})
            .await?;

        // No confidence threshold: the best-effort span is always returned
        let best = response
            .best()
            .ok_or_else(|| SnaError::Inference(format!("{}: no answer returned", self.model)))?;

        Ok(QaAnswer {
            answer: best.answer,
            score: best.score,
            start: best.start,
            end: best.end,
        })
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}
