//! Gemini API client.
//!
//! This module provides the [`GeminiClient`] for generating instrumented
//! code and listing the models available for generation.

mod gemini;

pub use gemini::{GeminiClient, ModelInfo};
