//! Token usage reported by a model call

use serde::{Deserialize, Serialize};

/// Token counts as the provider reported them. Any field may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: Option<usize>,
    pub output_tokens: Option<usize>,
    pub total_tokens: Option<usize>,
}

/// What the usage monitor gets to see for one call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageRecord {
    Reported(usize),
    Unknown,
}

impl TokenUsage {
    /// Usage with only a total
    pub fn total(total: usize) -> Self {
        Self {
            total_tokens: Some(total),
            ..Self::default()
        }
    }

    /// Usage with input and output counts
    pub fn split(input: usize, output: usize) -> Self {
        Self {
            input_tokens: Some(input),
            output_tokens: Some(output),
            total_tokens: None,
        }
    }

    /// Reported total, else input + output, else unknown
    pub fn record(&self) -> UsageRecord {
        match (self.total_tokens, self.input_tokens, self.output_tokens) {
            (Some(total), _, _) => UsageRecord::Reported(total),
            (None, Some(input), Some(output)) => UsageRecord::Reported(input + output),
            _ => UsageRecord::Unknown,
        }
    }
}
