//! Sampling parameters bound to an agent.

use serde::{Deserialize, Serialize};

/// Temperature and nucleus probability sent with every call an agent makes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    /// Sampling temperature
    pub temperature: f32,
    /// Nucleus sampling probability mass
    pub top_p: f32,
}

impl SamplingParams {
    /// Create sampling parameters.
    pub fn new(temperature: f32, top_p: f32) -> Self {
        Self { temperature, top_p }
    }
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: 0.8,
            top_p: 0.8,
        }
    }
}
