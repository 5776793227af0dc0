//! Client-side chat state: the conversation, the pending input, the busy flag
//! and the current set of map markers.

use crate::models::chat::{ ChatMessage, ChatRequest, ChatResponse, ErrorResponse };
use crate::models::location::Marker;
use async_trait::async_trait;
use log::{ info, warn };
use reqwest::Client as HttpClient;
use thiserror::Error;

pub const INITIAL_GREETING: &str =
    "Hi! I'm your Philippine travel assistant. I can help you plan your perfect trip to the Philippines. What kind of experience are you looking for?";
pub const TRANSPORT_APOLOGY: &str = "I'm sorry, I encountered an error. Please try again.";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Status {
        status: u16,
        message: String,
    },
}

#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ClientError>;
}

/// Posts the conversation to a running server's `/api/chat`.
pub struct HttpTransport {
    http: HttpClient,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { http: HttpClient::new(), endpoint: endpoint.into() }
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ClientError> {
        let resp = self.http.post(&self.endpoint).json(request).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .json::<ErrorResponse>().await
                .map(|body| body.error)
                .unwrap_or_else(|_| status.to_string());
            return Err(ClientError::Status { status: status.as_u16(), message });
        }
        Ok(resp.json::<ChatResponse>().await?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input, or a request is already in flight.
    Ignored,
    Replied,
    /// Transport failed; an apology was appended instead of a reply.
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatSession {
    pub messages: Vec<ChatMessage>,
    pub input: String,
    pub is_loading: bool,
    pub markers: Vec<Marker>,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::assistant(INITIAL_GREETING)],
            input: String::new(),
            is_loading: false,
            markers: Vec::new(),
        }
    }

    /// Moves the input into the conversation and marks the session busy.
    /// Returns the request to send, or `None` when there is nothing to send
    /// or a request is already outstanding.
    pub fn begin_submit(&mut self) -> Option<ChatRequest> {
        if self.input.trim().is_empty() || self.is_loading {
            return None;
        }
        let content = std::mem::take(&mut self.input);
        self.messages.push(ChatMessage::user(content));
        self.is_loading = true;
        Some(ChatRequest { messages: self.messages.clone() })
    }

    pub fn finish_submit(&mut self, result: Result<ChatResponse, ClientError>) -> SubmitOutcome {
        self.is_loading = false;
        match result {
            Ok(response) => {
                info!("Received reply with {} locations", response.locations.len());
                self.messages.push(response.message);
                self.markers = response.locations;
                SubmitOutcome::Replied
            }
            Err(e) => {
                warn!("Chat error: {}", e);
                self.messages.push(ChatMessage::assistant(TRANSPORT_APOLOGY));
                SubmitOutcome::Failed
            }
        }
    }

    pub async fn submit<T: ChatTransport + ?Sized>(&mut self, transport: &T) -> SubmitOutcome {
        let request = match self.begin_submit() {
            Some(request) => request,
            None => {
                return SubmitOutcome::Ignored;
            }
        };
        let result = transport.send(&request).await;
        self.finish_submit(result)
    }
}
