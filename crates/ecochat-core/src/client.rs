use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

/// Body returned by `POST /chat`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatReply {
    pub success: bool,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("could not reach chat backend: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("chat backend sent an unreadable response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    base_url: String,
}

impl ChatClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn chat_url(&self) -> String {
        format!("{}/chat", self.base_url)
    }

    /// Post a message and parse the reply.
    ///
    /// The HTTP status is not checked: the backend reports application
    /// failures as `{"success": false}` bodies, sometimes with a 4xx status.
    pub async fn send(&self, message: &str) -> Result<ChatReply, ChatError> {
        let url = self.chat_url();
        tracing::debug!(%url, chars = message.chars().count(), "posting chat message");

        let response = self
            .client
            .post(&url)
            .json(&ChatRequest { message })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let reply: ChatReply = serde_json::from_str(&body)?;

        tracing::debug!(
            %status,
            success = reply.success,
            tag = reply.tag.as_deref().unwrap_or("-"),
            confidence = reply.confidence.unwrap_or_default(),
            "chat reply received"
        );
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_chat_url_trims_trailing_slash() {
        let client = ChatClient::new("http://localhost:5000/");
        assert_eq!(client.chat_url(), "http://localhost:5000/chat");
    }

    #[tokio::test]
    async fn test_send_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(body_json(json!({ "message": "how do i recycle properly?" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "response": "Rinse containers first.",
                "timestamp": "10:15",
                "tag": "recycling",
                "confidence": 1.0
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ChatClient::new(&server.uri());
        let reply = client.send("how do i recycle properly?").await.unwrap();

        assert!(reply.success);
        assert_eq!(reply.response.as_deref(), Some("Rinse containers first."));
        assert_eq!(reply.tag.as_deref(), Some("recycling"));
    }

    #[tokio::test]
    async fn test_send_application_failure_with_bad_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "success": false,
                "error": "Empty message"
            })))
            .mount(&server)
            .await;

        let client = ChatClient::new(&server.uri());
        let reply = client.send(" ").await.unwrap();

        assert!(!reply.success);
        assert_eq!(reply.error.as_deref(), Some("Empty message"));
        assert_eq!(reply.response, None);
    }

    #[tokio::test]
    async fn test_send_non_json_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(500).set_body_string("<h1>Internal Server Error</h1>"))
            .mount(&server)
            .await;

        let client = ChatClient::new(&server.uri());
        let err = client.send("hello").await.unwrap_err();
        assert!(matches!(err, ChatError::Decode(_)));
    }

    #[tokio::test]
    async fn test_send_unreachable_is_transport_error() {
        let client = ChatClient::new("http://127.0.0.1:1");
        let err = client.send("hello").await.unwrap_err();
        assert!(matches!(err, ChatError::Transport(_)));
    }
}
