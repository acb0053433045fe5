/// Prefix marking secret results that must never reach the embedding service.
pub const FLAG_PREFIX: &str = "flag{";

/// First two coordinates of the sentinel vector; every other coordinate is zero.
pub const SENTINEL_A: f32 = 13.37;
pub const SENTINEL_B: f32 = 0.42;

/// How the vector for an extracted result is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorSource {
    Sentinel,
    NeedsEmbedding,
}

pub fn classify(text: &str) -> VectorSource {
    if text.starts_with(FLAG_PREFIX) {
        VectorSource::Sentinel
    } else {
        VectorSource::NeedsEmbedding
    }
}

/// Builds the recognisable marker vector stored for flag results.
pub fn sentinel_vector(dimensions: usize) -> Vec<f32> {
    let mut vector = vec![0.0; dimensions];
    for (slot, value) in vector.iter_mut().zip([SENTINEL_A, SENTINEL_B]) {
        *slot = value;
    }
    vector
}
