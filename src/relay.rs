//! Streaming passthrough from a generation upstream to an HTTP response
//!
//! The relay forwards upstream text chunks into the response body as they
//! arrive, in order, without buffering the full body. The first chunk
//! decides the response: an upstream failure before any output yields a 500
//! with a fixed body, while a failure after the response has committed
//! truncates the body with no in-band error — the status line is already on
//! the wire and cannot change.

use crate::error::Result;
use crate::providers::TextStream;

use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use futures::StreamExt;
use metrics::increment_counter;

/// Content type of every streamed generation response
pub const TEXT_PLAIN_UTF8: &str = "text/plain; charset=utf-8";

/// Lifecycle state of one relayed generation stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Chunks are still being relayed
    Open,
    /// The upstream sequence completed and the output was terminated
    Closed,
    /// The upstream raised before completing
    Failed,
}

/// One generation request's stream, with exclusive ownership of the
/// upstream iterator
///
/// Tracks the session lifecycle across [`StreamSession::next_chunk`] calls:
/// upstream exhaustion closes the session, the first upstream error fails
/// it permanently.
pub struct StreamSession {
    upstream: TextStream,
    state: SessionState,
}

impl StreamSession {
    /// Take ownership of an upstream chunk stream
    pub fn new(upstream: TextStream) -> Self {
        Self {
            upstream,
            state: SessionState::Open,
        }
    }

    /// Current session state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Pull the next chunk from the upstream
    ///
    /// Returns `None` once the session has left the `Open` state; a failed
    /// session never yields further chunks.
    pub async fn next_chunk(&mut self) -> Option<Result<String>> {
        if self.state != SessionState::Open {
            return None;
        }

        match self.upstream.next().await {
            Some(Ok(chunk)) => Some(Ok(chunk)),
            Some(Err(e)) => {
                self.state = SessionState::Failed;
                Some(Err(e))
            }
            None => {
                self.state = SessionState::Closed;
                None
            }
        }
    }
}

/// Relay an upstream chunk stream into an HTTP response
///
/// The response commits as soon as the first chunk is available, enabling
/// progressive rendering on the client. Chunks are forwarded in the exact
/// order received; there is no retry and no relay-owned timeout. If the
/// client disconnects mid-stream, the body stream is dropped, which drops
/// the upstream and releases its resources.
///
/// # Arguments
///
/// * `upstream` - The generation call's chunk stream
/// * `endpoint` - Originating endpoint name, used in failure logs
/// * `error_body` - Fixed plaintext body for a pre-commit failure response
///
/// # Returns
///
/// A `200 text/plain; charset=utf-8` streamed response, or a 500 with
/// `error_body` when the upstream fails before yielding anything.
pub async fn relay(upstream: TextStream, endpoint: &'static str, error_body: &'static str) -> Response {
    let mut session = StreamSession::new(upstream);

    match session.next_chunk().await {
        None => {
            // Upstream completed without output: commit an empty body.
            text_response(StatusCode::OK, String::new())
        }
        Some(Err(e)) => {
            tracing::error!(endpoint, error = %e, "Generation failed before any output");
            increment_counter!(
                "stream_relay_failures_total",
                "endpoint" => endpoint,
                "phase" => "before_commit"
            );
            text_response(StatusCode::INTERNAL_SERVER_ERROR, error_body.to_string())
        }
        Some(Ok(first)) => {
            increment_counter!("stream_relay_sessions_total", "endpoint" => endpoint);

            let rest = futures::stream::unfold(session, move |mut session| async move {
                match session.next_chunk().await {
                    Some(Ok(chunk)) => Some((Bytes::from(chunk), session)),
                    Some(Err(e)) => {
                        tracing::error!(
                            endpoint,
                            error = %e,
                            "Generation failed mid-stream, truncating committed response"
                        );
                        increment_counter!(
                            "stream_relay_failures_total",
                            "endpoint" => endpoint,
                            "phase" => "after_commit"
                        );
                        None
                    }
                    None => None,
                }
            });

            let body = futures::stream::iter([Bytes::from(first)])
                .chain(rest)
                .map(Ok::<_, std::convert::Infallible>);

            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, TEXT_PLAIN_UTF8)],
                Body::from_stream(body),
            )
                .into_response()
        }
    }
}

fn text_response(status: StatusCode, body: String) -> Response {
    (status, [(header::CONTENT_TYPE, TEXT_PLAIN_UTF8)], body).into_response()
}
