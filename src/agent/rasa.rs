//! Rasa server implementation of `Agent`

use super::types::{LoadModelRequest, StatusResponse};
use super::{Agent, AgentError, BotReply, UserMessage};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use std::time::Duration;

/// How to reach and prepare the Rasa server
#[derive(Debug, Clone)]
pub struct RasaConfig {
    /// Base URL of the Rasa HTTP API (e.g. `http://localhost:5005`)
    pub server_url: String,
    /// Model archive or directory the server should load
    pub model_path: String,
    /// Where the server calls back for custom actions. Must match the
    /// server's `endpoints.yml`; only validated and logged here.
    pub action_endpoint: String,
    /// Upper bound for every request to the server
    pub timeout: Duration,
}

impl Default for RasaConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:5005".to_string(),
            model_path: "./models".to_string(),
            action_endpoint: "http://localhost:5055/webhook".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Agent backed by a Rasa server's REST channel
pub struct RasaAgent {
    client: Client,
    base_url: String,
    model_id: String,
}

impl RasaAgent {
    /// Connect without touching the server's model
    pub fn new(config: &RasaConfig) -> Result<Self, AgentError> {
        Url::parse(&config.server_url).map_err(|e| {
            AgentError::network(format!("Invalid server URL '{}': {e}", config.server_url))
        })?;
        Url::parse(&config.action_endpoint).map_err(|e| {
            AgentError::network(format!(
                "Invalid action endpoint '{}': {e}",
                config.action_endpoint
            ))
        })?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AgentError::network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.server_url.trim_end_matches('/').to_string(),
            model_id: config.model_path.clone(),
        })
    }

    /// Connect, load `config.model_path` into the server and confirm a model
    /// is active. Any failure here means the gateway must not start.
    pub async fn load(config: &RasaConfig) -> Result<Self, AgentError> {
        let mut agent = Self::new(config)?;

        agent.load_model(&config.model_path).await?;
        let status = agent.status().await?;

        let model_file = status
            .model_file
            .filter(|f| !f.is_empty())
            .ok_or_else(|| AgentError::model_not_loaded("Runtime reports no loaded model"))?;
        agent.model_id = status.model_id.unwrap_or(model_file);

        tracing::info!(
            server = %agent.base_url,
            model = %agent.model_id,
            action_endpoint = %config.action_endpoint,
            "Dialogue runtime ready"
        );

        Ok(agent)
    }

    async fn load_model(&self, model_path: &str) -> Result<(), AgentError> {
        let url = format!("{}/model", self.base_url);
        let response = self
            .client
            .put(&url)
            .json(&LoadModelRequest {
                model_file: model_path,
            })
            .send()
            .await
            .map_err(|e| AgentError::from_reqwest("Loading model", &e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::model_not_loaded(format!(
                "Runtime refused model '{model_path}': HTTP {status}: {body}"
            )));
        }
        Ok(())
    }

    async fn status(&self) -> Result<StatusResponse, AgentError> {
        let url = format!("{}/status", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AgentError::from_reqwest("Checking status", &e))?;

        let response = check_status(response).await?;
        response
            .json::<StatusResponse>()
            .await
            .map_err(|e| AgentError::from_reqwest("Checking status", &e))
    }
}

/// Turn a non-success HTTP status into an error carrying the body
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, AgentError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(classify_error(status, &body))
}

fn classify_error(status: StatusCode, body: &str) -> AgentError {
    match status.as_u16() {
        409 => AgentError::model_not_loaded(format!("No model loaded: {body}")),
        500..=599 => AgentError::server_error(format!("Server error: HTTP {status}: {body}")),
        _ => AgentError::server_error(format!("HTTP {status}: {body}")),
    }
}

#[async_trait]
impl Agent for RasaAgent {
    async fn handle_text(
        &self,
        message: &str,
        sender_id: &str,
    ) -> Result<Vec<BotReply>, AgentError> {
        let url = format!("{}/webhooks/rest/webhook", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&UserMessage {
                sender: sender_id,
                message,
            })
            .send()
            .await
            .map_err(|e| AgentError::from_reqwest("Sending message", &e))?;

        let response = check_status(response).await?;
        let body = response
            .text()
            .await
            .map_err(|e| AgentError::from_reqwest("Reading reply", &e))?;

        serde_json::from_str(&body).map_err(|e| {
            AgentError::invalid_response(format!("Failed to parse reply: {e} - body: {body}"))
        })
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentErrorKind;
    use axum::{
        http::StatusCode as AxumStatus,
        routing::{get, post, put},
        Json, Router,
    };
    use serde_json::{json, Value};

    /// Serve `router` on an ephemeral port, returning its base URL
    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn config_for(server_url: String) -> RasaConfig {
        RasaConfig {
            server_url,
            model_path: "models/pregnancy.tar.gz".to_string(),
            timeout: Duration::from_secs(2),
            ..Default::default()
        }
    }

    fn healthy_runtime() -> Router {
        Router::new()
            .route("/model", put(|| async { AxumStatus::NO_CONTENT }))
            .route(
                "/status",
                get(|| async {
                    Json(json!({
                        "model_file": "models/pregnancy.tar.gz",
                        "model_id": "abc123",
                        "num_active_training_jobs": 0
                    }))
                }),
            )
    }

    #[tokio::test]
    async fn test_load_reports_model_id() {
        let url = spawn_stub(healthy_runtime()).await;
        let agent = RasaAgent::load(&config_for(url)).await.unwrap();
        assert_eq!(agent.model_id(), "abc123");
    }

    #[tokio::test]
    async fn test_load_fails_when_model_refused() {
        let router = Router::new().route(
            "/model",
            put(|| async { (AxumStatus::BAD_REQUEST, "bad model file") }),
        );
        let url = spawn_stub(router).await;
        let err = RasaAgent::load(&config_for(url)).await.err().unwrap();
        assert_eq!(err.kind, AgentErrorKind::ModelNotLoaded);
        assert!(err.message.contains("bad model file"));
    }

    #[tokio::test]
    async fn test_load_fails_without_active_model() {
        let router = Router::new()
            .route("/model", put(|| async { AxumStatus::NO_CONTENT }))
            .route(
                "/status",
                get(|| async { Json(json!({"model_file": "", "num_active_training_jobs": 0})) }),
            );
        let url = spawn_stub(router).await;
        let err = RasaAgent::load(&config_for(url)).await.err().unwrap();
        assert_eq!(err.kind, AgentErrorKind::ModelNotLoaded);
    }

    #[tokio::test]
    async fn test_load_fails_when_unreachable() {
        // Bind then drop to get a port nobody listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = RasaAgent::load(&config_for(format!("http://{addr}")))
            .await
            .err()
            .unwrap();
        assert_eq!(err.kind, AgentErrorKind::Network);
    }

    #[test]
    fn test_new_rejects_bad_urls() {
        let config = RasaConfig {
            server_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(RasaAgent::new(&config).is_err());

        let config = RasaConfig {
            action_endpoint: "::".to_string(),
            ..Default::default()
        };
        assert!(RasaAgent::new(&config).is_err());
    }

    #[tokio::test]
    async fn test_handle_text_forwards_sender_and_message() {
        let router = Router::new().route(
            "/webhooks/rest/webhook",
            post(|Json(body): Json<Value>| async move {
                Json(json!([
                    {
                        "recipient_id": body["sender"],
                        "text": format!("echo: {}", body["message"].as_str().unwrap_or_default()),
                        "buttons": [{"title": "More tips", "payload": "/ask_tips"}]
                    },
                    {"recipient_id": body["sender"], "image": "https://example.com/a.png"}
                ]))
            }),
        );
        let url = spawn_stub(router).await;
        let agent = RasaAgent::new(&config_for(url)).unwrap();

        let replies = agent.handle_text("hello", "mom-42").await.unwrap();
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0].recipient_id, "mom-42");
        assert_eq!(replies[0].text.as_deref(), Some("echo: hello"));
        let buttons = replies[0].buttons.as_ref().unwrap();
        assert_eq!(buttons[0]["payload"], "/ask_tips");
        assert!(replies[1].text.is_none());
        assert_eq!(replies[1].image.as_deref(), Some("https://example.com/a.png"));
    }

    #[tokio::test]
    async fn test_handle_text_accepts_buttons_without_payload() {
        let router = Router::new().route(
            "/webhooks/rest/webhook",
            post(|| async {
                Json(json!([
                    {
                        "recipient_id": "u",
                        "text": "See our guide",
                        "buttons": [
                            {"title": "Open guide", "type": "web_url", "url": "https://example.com/guide"}
                        ]
                    },
                    {
                        "recipient_id": "u",
                        "text": "Anything else?",
                        "buttons": [{"title": "Call clinic", "type": "phone_number", "number": "+15550100"}]
                    }
                ]))
            }),
        );
        let url = spawn_stub(router).await;
        let agent = RasaAgent::new(&config_for(url)).unwrap();

        let replies = agent.handle_text("guide", "u").await.unwrap();
        assert_eq!(replies.len(), 2);
        assert_eq!(
            replies[0].buttons,
            Some(vec![json!({
                "title": "Open guide",
                "type": "web_url",
                "url": "https://example.com/guide"
            })])
        );
        assert_eq!(replies[1].buttons.as_ref().unwrap()[0]["number"], "+15550100");
    }

    #[tokio::test]
    async fn test_handle_text_empty_list() {
        let router = Router::new().route(
            "/webhooks/rest/webhook",
            post(|| async { Json(json!([])) }),
        );
        let url = spawn_stub(router).await;
        let agent = RasaAgent::new(&config_for(url)).unwrap();
        assert!(agent.handle_text("hello", "s").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_handle_text_server_error() {
        let router = Router::new().route(
            "/webhooks/rest/webhook",
            post(|| async { (AxumStatus::INTERNAL_SERVER_ERROR, "tracker store down") }),
        );
        let url = spawn_stub(router).await;
        let agent = RasaAgent::new(&config_for(url)).unwrap();

        let err = agent.handle_text("hello", "s").await.unwrap_err();
        assert_eq!(err.kind, AgentErrorKind::ServerError);
        assert!(err.to_string().contains("tracker store down"));
    }

    #[tokio::test]
    async fn test_handle_text_invalid_body() {
        let router = Router::new().route(
            "/webhooks/rest/webhook",
            post(|| async { "definitely not json" }),
        );
        let url = spawn_stub(router).await;
        let agent = RasaAgent::new(&config_for(url)).unwrap();

        let err = agent.handle_text("hello", "s").await.unwrap_err();
        assert_eq!(err.kind, AgentErrorKind::InvalidResponse);
    }

    #[tokio::test]
    async fn test_handle_text_times_out() {
        let router = Router::new().route(
            "/webhooks/rest/webhook",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!([]))
            }),
        );
        let url = spawn_stub(router).await;
        let config = RasaConfig {
            timeout: Duration::from_millis(200),
            ..config_for(url)
        };
        let agent = RasaAgent::new(&config).unwrap();

        let err = agent.handle_text("hello", "s").await.unwrap_err();
        assert_eq!(err.kind, AgentErrorKind::Timeout);
    }
}
