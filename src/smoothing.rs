//! EMA smoothing state for the weighted engine
//!
//! The smoothed debt is the only value that outlives a single engine call.
//! It is kept in an explicit state object that callers pass in and get back,
//! and that can be saved and restored as JSON between sessions.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Smoothed debt carried from one weighted computation to the next
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SmoothingState {
    /// Last smoothed debt value (hours)
    pub smoothed_debt: f64,
}

impl SmoothingState {
    /// Start from a known smoothed value
    pub fn new(smoothed_debt: f64) -> Self {
        Self { smoothed_debt }
    }

    /// Blend a raw debt into the state: `raw * (1 - α) + previous * α`.
    ///
    /// With α = 0 the result is exactly `raw`.
    pub fn blend(self, raw_debt: f64, alpha: f64) -> Self {
        let smoothed_debt = if alpha == 0.0 {
            raw_debt
        } else {
            raw_debt * (1.0 - alpha) + self.smoothed_debt * alpha
        };

        debug!(
            raw_debt,
            previous = self.smoothed_debt,
            smoothed = smoothed_debt,
            alpha,
            "smoothed debt"
        );

        Self { smoothed_debt }
    }

    /// Load smoothing state from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize smoothing state to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_alpha_is_identity() {
        let state = SmoothingState::new(12.0).blend(3.3, 0.0);
        assert_eq!(state.smoothed_debt, 3.3);
    }

    #[test]
    fn test_blend() {
        // 10 * 0.9 + 0 * 0.1 = 9
        let state = SmoothingState::default().blend(10.0, 0.1);
        assert!((state.smoothed_debt - 9.0).abs() < 1e-9);

        // 10 * 0.9 + 9 * 0.1 = 9.9
        let state = state.blend(10.0, 0.1);
        assert!((state.smoothed_debt - 9.9).abs() < 1e-9);
    }

    #[test]
    fn test_converges_to_constant_input() {
        let mut state = SmoothingState::default();
        for _ in 0..200 {
            state = state.blend(5.0, 0.5);
        }
        assert!((state.smoothed_debt - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_serialization() {
        let state = SmoothingState::default().blend(4.0, 0.25);
        let json = state.to_json().unwrap();
        let loaded = SmoothingState::from_json(&json).unwrap();
        assert_eq!(state, loaded);
    }
}
