//! Text-generation upstream abstraction
//!
//! This module defines the `GenerationProvider` trait the request handlers
//! depend on, along with the request types and the Gemini implementation.

pub mod base;
pub mod gemini;

pub use base::{GenerationProvider, GenerationRequest, InlineImage, TextStream};
pub use gemini::GeminiProvider;
