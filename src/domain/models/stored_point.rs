use serde::{Deserialize, Serialize};

/// Payload attached to every stored point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPayload {
    pub result: String,
}

/// A single entry in the vector store, keyed by a caller-supplied id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPoint {
    id: u64,
    vector: Vec<f32>,
    payload: ResultPayload,
}

impl StoredPoint {
    pub fn new(id: u64, vector: Vec<f32>, result: impl Into<String>) -> Self {
        Self {
            id,
            vector,
            payload: ResultPayload {
                result: result.into(),
            },
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn vector(&self) -> &[f32] {
        &self.vector
    }

    pub fn payload(&self) -> &ResultPayload {
        &self.payload
    }

    pub fn result(&self) -> &str {
        &self.payload.result
    }

    pub fn dimensions(&self) -> usize {
        self.vector.len()
    }
}
