//! Base provider trait and common types for text generation
//!
//! This module defines the GenerationProvider trait the generation
//! endpoints depend on, along with the request structures for plain-text
//! and multimodal prompts.

use crate::error::Result;
use async_trait::async_trait;
use futures::stream::BoxStream;

/// A finite, ordered, non-restartable sequence of text chunks
///
/// Produced by one upstream generation call. Errors may appear before any
/// chunk or between chunks; the sequence ends at the first error or at
/// upstream completion.
pub type TextStream = BoxStream<'static, Result<String>>;

/// Inline image attached to a generation request
///
/// The image travels as base64 data tagged with its MIME type; it is never
/// decoded by this crate.
#[derive(Debug, Clone)]
pub struct InlineImage {
    /// MIME type of the image (e.g. `image/jpeg`)
    pub mime_type: String,
    /// Base64-encoded image bytes
    pub data_base64: String,
}

/// A single generation request
///
/// # Examples
///
/// ```
/// use namunamu::providers::GenerationRequest;
///
/// let request = GenerationRequest::text("Suggest a soup recipe.");
/// assert!(request.image.is_none());
/// ```
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Prompt text
    pub prompt: String,
    /// Optional inline image for multimodal prompts
    pub image: Option<InlineImage>,
}

impl GenerationRequest {
    /// Create a plain-text request
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            image: None,
        }
    }

    /// Create a multimodal request with an inline image
    pub fn with_image(prompt: impl Into<String>, image: InlineImage) -> Self {
        Self {
            prompt: prompt.into(),
            image: Some(image),
        }
    }
}

/// Provider trait for streaming text generation
///
/// Implementations call a hosted generation API and expose the response as
/// an ordered stream of text chunks.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Start a generation call and return its chunk stream
    ///
    /// # Arguments
    ///
    /// * `request` - Prompt and optional inline image
    ///
    /// # Returns
    ///
    /// Returns the upstream chunk stream. A failure before any output is an
    /// `Err` from this method or the stream's first item; failures between
    /// chunks surface as `Err` items mid-stream.
    ///
    /// # Errors
    ///
    /// Returns error if the upstream call cannot be started
    async fn stream_generate(&self, request: GenerationRequest) -> Result<TextStream>;

    /// Identifier of the model this provider requests
    fn model(&self) -> String;
}
