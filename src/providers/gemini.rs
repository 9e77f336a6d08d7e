//! Gemini provider implementation
//!
//! Calls the `streamGenerateContent` endpoint with `alt=sse` and exposes
//! the SSE response as an ordered stream of text chunks. Each SSE `data:`
//! event carries one JSON payload whose candidate parts contribute one
//! chunk; transport failures mid-stream are forwarded as `Err` items so the
//! relay can distinguish truncation from completion.

use crate::config::GeminiConfig;
use crate::error::{NamuError, Result};
use crate::providers::{GenerationProvider, GenerationRequest, TextStream};

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// Gemini API provider
///
/// # Examples
///
/// ```no_run
/// use namunamu::config::GeminiConfig;
/// use namunamu::providers::{GeminiProvider, GenerationProvider, GenerationRequest};
///
/// # async fn example() -> namunamu::error::Result<()> {
/// let config = GeminiConfig {
///     api_key: Some("key".to_string()),
///     ..Default::default()
/// };
/// let provider = GeminiProvider::new(config)?;
/// let stream = provider
///     .stream_generate(GenerationRequest::text("Suggest a soup recipe."))
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
    api_key: String,
}

/// Request body for `streamGenerateContent`
#[derive(Debug, Serialize)]
struct GeminiGenerateRequest {
    contents: Vec<GeminiContent>,
}

/// One content entry (role + parts)
#[derive(Debug, Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

/// A text or inline-data part
#[derive(Debug, Serialize)]
struct GeminiPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    inline_data: Option<GeminiInlineData>,
}

/// Base64 image payload tagged with its MIME type
#[derive(Debug, Serialize)]
struct GeminiInlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

/// One streamed response event
#[derive(Debug, Deserialize)]
struct GeminiStreamChunk {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

/// A response candidate
#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiChunkContent>,
}

/// Candidate content (parts only; role is ignored)
#[derive(Debug, Deserialize)]
struct GeminiChunkContent {
    #[serde(default)]
    parts: Vec<GeminiChunkPart>,
}

/// One candidate part
#[derive(Debug, Deserialize)]
struct GeminiChunkPart {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiProvider {
    /// Create a new Gemini provider instance
    ///
    /// # Arguments
    ///
    /// * `config` - Gemini configuration (api_base, model, key)
    ///
    /// # Errors
    ///
    /// Returns error if no API key is configured or HTTP client
    /// initialization fails
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let api_key = config.resolve_api_key()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .user_agent("namunamu/0.2.0")
            .build()
            .map_err(|e| NamuError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            "Initialized Gemini provider: api_base={}, model={}",
            config.api_base,
            config.model
        );

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// Convert a generation request to the Gemini wire format
    fn convert_request(&self, request: &GenerationRequest) -> GeminiGenerateRequest {
        let mut parts = Vec::new();

        if let Some(image) = &request.image {
            parts.push(GeminiPart {
                text: None,
                inline_data: Some(GeminiInlineData {
                    mime_type: image.mime_type.clone(),
                    data: image.data_base64.clone(),
                }),
            });
        }

        parts.push(GeminiPart {
            text: Some(request.prompt.clone()),
            inline_data: None,
        });

        GeminiGenerateRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts,
            }],
        }
    }
}

#[async_trait]
impl GenerationProvider for GeminiProvider {
    async fn stream_generate(&self, request: GenerationRequest) -> Result<TextStream> {
        let url = format!(
            "{}/v1beta/models/{}:streamGenerateContent?alt=sse",
            self.config.api_base, self.config.model
        );
        tracing::debug!("Starting generation stream: model={}", self.config.model);

        let body = self.convert_request(&request);
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Failed to reach generation API: {}", e);
                NamuError::Provider(format!("Failed to reach generation API: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Generation API returned {}: {}", status, error_text);
            return Err(NamuError::Provider(format!(
                "Generation API returned {}: {}",
                status, error_text
            ))
            .into());
        }

        let byte_stream = response.bytes_stream();
        let (tx, rx) = mpsc::unbounded_channel::<Result<String>>();

        tokio::spawn(async move {
            parse_sse_chunks(byte_stream, tx).await;
        });

        Ok(Box::pin(UnboundedReceiverStream::new(rx)))
    }

    fn model(&self) -> String {
        self.config.model.clone()
    }
}

/// Parse an SSE byte stream and forward each event's text to `tx`
///
/// SSE events are separated by blank lines; `data:` lines carry one JSON
/// payload each. Events without extractable text (and `[DONE]` sentinels)
/// are skipped. A transport error ends the stream with one `Err` item.
/// When the receiver is dropped (client disconnected), parsing stops and
/// the upstream response body is released.
async fn parse_sse_chunks(
    byte_stream: impl Stream<Item = reqwest::Result<Bytes>>,
    tx: mpsc::UnboundedSender<Result<String>>,
) {
    use futures::StreamExt;

    // Buffer accumulates raw bytes between `\n\n` boundaries.
    let mut buffer = String::new();

    tokio::pin!(byte_stream);

    while let Some(chunk_result) = byte_stream.next().await {
        let chunk = match chunk_result {
            Ok(c) => c,
            Err(e) => {
                let _ = tx.send(Err(
                    NamuError::Provider(format!("Stream transport error: {}", e)).into(),
                ));
                return;
            }
        };

        let text = match std::str::from_utf8(&chunk) {
            Ok(s) => s.to_string(),
            Err(_) => continue,
        };

        buffer.push_str(&text);

        while let Some(pos) = buffer.find("\n\n") {
            let event_block = buffer[..pos].to_string();
            buffer = buffer[pos + 2..].to_string();
            forward_event(&event_block, &tx);
        }

        if tx.is_closed() {
            tracing::debug!("Generation stream consumer gone, stopping upstream read");
            return;
        }
    }

    // Process any remaining partial event in the buffer.
    if !buffer.is_empty() {
        forward_event(&buffer, &tx);
    }
}

/// Extract the text of one SSE event block and forward it if non-empty
fn forward_event(event_block: &str, tx: &mpsc::UnboundedSender<Result<String>>) {
    let data_lines: Vec<&str> = event_block
        .lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(str::trim)
        .collect();

    if data_lines.is_empty() {
        return;
    }

    let data = data_lines.join("\n");
    if data.is_empty() || data == "[DONE]" {
        return;
    }

    match extract_text(&data) {
        Some(text) => {
            let _ = tx.send(Ok(text));
        }
        None => {
            tracing::debug!("Skipping generation event without text");
        }
    }
}

/// Pull the concatenated part text out of one event payload
fn extract_text(data: &str) -> Option<String> {
    let chunk: GeminiStreamChunk = serde_json::from_str(data).ok()?;
    let candidate = chunk.candidates.into_iter().next()?;
    let content = candidate.content?;

    let text: String = content
        .parts
        .into_iter()
        .filter_map(|part| part.text)
        .collect();

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
