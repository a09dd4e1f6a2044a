// Detector configuration
// Averaging window and hysteresis parameters, validated once at construction

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a configuration fails validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("category_count must be greater than zero")]
    ZeroCategoryCount,

    #[error("window_duration_ms must be greater than zero")]
    ZeroWindowDuration,

    #[error("minimum_sample_count must be greater than zero")]
    ZeroMinimumSampleCount,
}

/// Configuration for the streaming event detector
/// Supplied once at startup; immutable for the detector's lifetime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Number of score categories in every incoming frame
    pub category_count: usize,

    /// Drop all results older than this many milliseconds behind the
    /// newest sample
    pub window_duration_ms: u64,

    /// Minimum averaged score for a category to be considered detected,
    /// 0-255; 255 = highest confidence
    pub detection_threshold: u8,

    /// Number of contrary winning results required to lift suppression
    /// after a detection fires
    pub suppression_count: u32,

    /// Minimum number of in-window samples before a result is trusted
    pub minimum_sample_count: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig {
            category_count: 3,
            window_duration_ms: 1000,
            detection_threshold: 160,
            suppression_count: 1,
            minimum_sample_count: 1,
        }
    }
}

impl DetectorConfig {
    /// Check the construction constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.category_count == 0 {
            return Err(ConfigError::ZeroCategoryCount);
        }
        if self.window_duration_ms == 0 {
            return Err(ConfigError::ZeroWindowDuration);
        }
        if self.minimum_sample_count == 0 {
            return Err(ConfigError::ZeroMinimumSampleCount);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(DetectorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_category_count_rejected() {
        let config = DetectorConfig {
            category_count: 0,
            ..DetectorConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroCategoryCount));
    }

    #[test]
    fn test_zero_window_duration_rejected() {
        let config = DetectorConfig {
            window_duration_ms: 0,
            ..DetectorConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroWindowDuration));
    }

    #[test]
    fn test_zero_minimum_sample_count_rejected() {
        let config = DetectorConfig {
            minimum_sample_count: 0,
            ..DetectorConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroMinimumSampleCount));
    }

    #[test]
    fn test_config_round_trip() {
        let config = DetectorConfig {
            category_count: 4,
            window_duration_ms: 750,
            detection_threshold: 200,
            suppression_count: 3,
            minimum_sample_count: 5,
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: DetectorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.category_count, 4);
        assert_eq!(parsed.window_duration_ms, 750);
        assert_eq!(parsed.detection_threshold, 200);
        assert_eq!(parsed.suppression_count, 3);
        assert_eq!(parsed.minimum_sample_count, 5);
    }
}
