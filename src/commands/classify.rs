use serde::Serialize;

use crate::config::{Algorithm, ClassifierConfig};
use crate::models::SentimentTag;
use crate::sentiment::build_classifier;

#[derive(Debug, Serialize)]
pub struct Classification {
    pub text: String,
    pub sentiment: SentimentTag,
    pub classifier: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

pub fn run(text: String, algorithm: Option<Algorithm>, config: &ClassifierConfig) -> Classification {
    let mut config = config.clone();
    if let Some(algorithm) = algorithm {
        config.algorithm = algorithm;
    }

    let classifier = build_classifier(&config);
    Classification {
        sentiment: classifier.classify(&text),
        score: classifier.score(&text),
        classifier: classifier.name(),
        text,
    }
}
