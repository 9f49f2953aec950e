//! Real-time subscriptions over a WebSocket upgrade.
//!
//! A subscription is the one long-lived connection the client opens. The
//! caller owns it and ends it by closing or dropping it; there is no
//! heartbeat or reconnect logic.

use std::collections::HashMap;
use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use futures::{SinkExt, StreamExt};
use serde::de::DeserializeOwned;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::header::AUTHORIZATION;
use tokio_tungstenite::tungstenite::http::{HeaderName, HeaderValue};
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use url::Url;

use crate::clients::http_client::{decode, HttpClient};
use crate::clients::ClientError;

/// The underlying WebSocket stream type.
pub type EventStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// A full-duplex message stream opened by [`HttpClient::subscribe`].
pub struct Subscription {
    stream: EventStream,
    status: u16,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl Subscription {
    /// Returns the status code of the upgrade response (normally 101).
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Waits for the next frame of any kind.
    ///
    /// Returns `None` once the server has closed the stream.
    pub async fn next_message(&mut self) -> Option<Result<Message, ClientError>> {
        self.stream
            .next()
            .await
            .map(|frame| frame.map_err(ClientError::from))
    }

    /// Waits for the next text frame and decodes it as JSON.
    ///
    /// Ping, pong and binary frames are skipped. Returns `None` once the
    /// stream is closed.
    pub async fn next_event<T: DeserializeOwned>(&mut self) -> Option<Result<T, ClientError>> {
        while let Some(frame) = self.next_message().await {
            match frame {
                Ok(Message::Text(text)) => return Some(decode(&text)),
                Ok(Message::Close(_)) => return None,
                Ok(_) => {}
                Err(error) => return Some(Err(error)),
            }
        }
        None
    }

    /// Sends a frame to the server.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Subscription`] if the frame cannot be written.
    pub async fn send(&mut self, message: Message) -> Result<(), ClientError> {
        self.stream.send(message).await?;
        Ok(())
    }

    /// Closes the stream.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Subscription`] if the close handshake fails.
    pub async fn close(mut self) -> Result<(), ClientError> {
        match self.stream.close(None).await {
            Ok(()) | Err(tungstenite::Error::ConnectionClosed) => Ok(()),
            Err(error) => Err(error.into()),
        }
    }

    /// Returns the underlying WebSocket stream.
    #[must_use]
    pub fn into_inner(self) -> EventStream {
        self.stream
    }
}

impl HttpClient {
    /// Upgrades `url` to a WebSocket connection for push-style events.
    ///
    /// `http`/`https` URLs are switched to `ws`/`wss`. `headers` are sent on
    /// the upgrade request together with the Basic credentials, and the
    /// handshake is bounded by the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `url` cannot be parsed, and
    /// [`ClientError::Subscription`] if a header is malformed or the
    /// handshake fails or times out.
    pub async fn subscribe(
        &self,
        url: &str,
        headers: &HashMap<String, Vec<String>>,
    ) -> Result<Subscription, ClientError> {
        let ws_url = websocket_url(url)?;
        tracing::debug!(url = %ws_url, "opening subscription");

        let mut request = ws_url.as_str().into_client_request()?;
        let request_headers = request.headers_mut();
        for (name, values) in headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| tungstenite::Error::HttpFormat(e.into()))?;
            for value in values {
                let value = HeaderValue::from_str(value)
                    .map_err(|e| tungstenite::Error::HttpFormat(e.into()))?;
                request_headers.append(name.clone(), value);
            }
        }
        let credentials = basic_credentials(
            self.options().access_key().as_ref(),
            self.options().secret_key().as_ref(),
        );
        let credentials = HeaderValue::from_str(&credentials)
            .map_err(|e| tungstenite::Error::HttpFormat(e.into()))?;
        request_headers.insert(AUTHORIZATION, credentials);

        let handshake = tokio_tungstenite::connect_async(request);
        let (stream, response) = tokio::time::timeout(self.options().timeout(), handshake)
            .await
            .map_err(|_| {
                tungstenite::Error::Io(std::io::Error::new(
                    std::io::ErrorKind::TimedOut,
                    "subscription handshake timed out",
                ))
            })??;

        Ok(Subscription {
            stream,
            status: response.status().as_u16(),
        })
    }
}

/// Switches an `http`/`https` URL to the matching WebSocket scheme.
fn websocket_url(url: &str) -> Result<Url, ClientError> {
    let invalid = |source| ClientError::InvalidUrl {
        url: url.to_string(),
        source,
    };
    let mut parsed = Url::parse(url).map_err(invalid)?;

    let scheme = match parsed.scheme() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        _ => return Err(invalid(url::ParseError::RelativeUrlWithoutBase)),
    };
    if parsed.set_scheme(scheme).is_err() {
        return Err(invalid(url::ParseError::RelativeUrlWithoutBase));
    }

    Ok(parsed)
}

/// Renders an `Authorization` header value for HTTP Basic credentials.
fn basic_credentials(access_key: &str, secret_key: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{access_key}:{secret_key}")))
}
