//! Named entity recognition facility
//!
//! Requests the "simple" aggregation strategy so adjacent sub-word tokens of
//! the same type come back as one grouped entity.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sna_core::{EntityAnnotation, EntityRecognizer, Result};

use crate::client::HfClient;

#[derive(Debug, Serialize)]
struct NerParameters {
    aggregation_strategy: &'static str,
}

#[derive(Debug, Deserialize)]
struct NerOutput {
    #[serde(alias = "entity")]
    entity_group: String,
    score: f32,
    word: String,
    #[serde(default)]
    start: Option<usize>,
    #[serde(default)]
    end: Option<usize>,
}

impl From<NerOutput> for EntityAnnotation {
    fn from(o: NerOutput) -> Self {
        Self {
            word: o.word,
            entity_group: o.entity_group,
            score: o.score,
            start: o.start,
            end: o.end,
        }
    }
}

/// Entity recognizer backed by a hosted token-classification model
pub struct HfEntityRecognizer {
    client: HfClient,
    model: String,
}

impl HfEntityRecognizer {
    pub fn new(client: HfClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl EntityRecognizer for HfEntityRecognizer {
    async fn recognize(&self, text: &str) -> Result<Vec<EntityAnnotation>> {
        let parameters = NerParameters {
            aggregation_strategy: "simple",
        };

        let outputs: Vec<NerOutput> = self.client.infer(&self.model, text, &parameters).await?;

        // Keep the model's left-to-right order
        Ok(outputs.into_iter().map(EntityAnnotation::from).collect())
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_grouped_entities() {
        let json = r#"[
            {"entity_group": "PER", "score": 0.9987, "word": "Lionel Messi", "start": 0, "end": 12},
            {"entity_group": "ORG", "score": 0.91, "word": "Inter Miami", "start": 25, "end": 36}
        ]"#;
        let outputs: Vec<NerOutput> = serde_json::from_str(json).unwrap();
        let entities: Vec<EntityAnnotation> = outputs.into_iter().map(Into::into).collect();

        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].word, "Lionel Messi");
        assert_eq!(entities[0].start, Some(0));
        assert_eq!(entities[1].entity_group, "ORG");
    }

    #[test]
    fn test_parse_entity_alias() {
        let json = r#"[{"entity": "LOC", "score": 0.5, "word": "Paris"}]"#;
        let outputs: Vec<NerOutput> = serde_json::from_str(json).unwrap();
        assert_eq!(outputs[0].entity_group, "LOC");
        assert_eq!(outputs[0].start, None);
    }
}
