use serde::{Deserialize, Serialize};

/// Body returned by every processing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BionicResponse {
    pub bionic_text: String,
}

/// Output length bounds handed to the model, in the model's own units.
/// Sampling is always disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryLengths {
    pub max_length: usize,
    pub min_length: usize,
}
