// Movement detection module
// Batch-count debouncing for boolean motion sample streams

pub mod debounce;

pub use debounce::{MotionConfig, MotionConfigError, MotionDebouncer, MotionVerdict};
