// src/services/bedrock.rs

use std::time::SystemTime;

use async_trait::async_trait;
use aws_credential_types::Credentials;
use aws_sigv4::http_request::{SignableBody, SignableRequest, SigningSettings, sign};
use aws_sigv4::sign::v4;
use aws_smithy_runtime_api::client::identity::Identity;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use url::{Url, form_urlencoded};

use crate::{
    config::{AwsCredentials, Config},
    services::model::{ModelError, TextModel},
};

const SERVICE: &str = "bedrock";
const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

/// Anthropic messages request, as accepted by the Bedrock `InvokeModel` API.
#[derive(Debug, Serialize)]
struct InvokeRequest<'a> {
    anthropic_version: &'static str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct InvokeResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

/// Text model hosted on AWS Bedrock, called over plain HTTPS with SigV4 signing.
#[derive(Clone)]
pub struct BedrockModel {
    client: reqwest::Client,
    endpoint: String,
    region: String,
    model_id: String,
    max_tokens: u32,
    credentials: AwsCredentials,
}

impl BedrockModel {
    pub fn from_config(config: &Config) -> Self {
        let endpoint = config.model_endpoint.clone().unwrap_or_else(|| {
            format!("https://bedrock-runtime.{}.amazonaws.com", config.aws_region)
        });

        let client = reqwest::Client::builder()
            .timeout(config.model_timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            endpoint,
            region: config.aws_region.clone(),
            model_id: config.model_id.clone(),
            max_tokens: config.max_tokens,
            credentials: config.aws_credentials.clone(),
        }
    }

    fn invoke_url(&self) -> Result<Url, ModelError> {
        let raw = format!(
            "{}/model/{}/invoke",
            self.endpoint.trim_end_matches('/'),
            form_urlencoded::byte_serialize(self.model_id.as_bytes()).collect::<String>()
        );
        Url::parse(&raw).map_err(|_| ModelError::NotConfigured("BEDROCK_ENDPOINT"))
    }

    fn check_configured(&self) -> Result<(), ModelError> {
        if self.region.trim().is_empty() {
            return Err(ModelError::NotConfigured("AWS_REGION"));
        }
        if self.credentials.access_key_id.trim().is_empty() {
            return Err(ModelError::NotConfigured("AWS_ACCESS_KEY_ID"));
        }
        if self.credentials.secret_access_key.trim().is_empty() {
            return Err(ModelError::NotConfigured("AWS_SECRET_ACCESS_KEY"));
        }
        Ok(())
    }

    /// SigV4 headers for one `InvokeModel` call.
    fn signed_headers(
        &self,
        url: &Url,
        body: &[u8],
    ) -> Result<Vec<(String, String)>, ModelError> {
        let identity: Identity = Credentials::new(
            self.credentials.access_key_id.clone(),
            self.credentials.secret_access_key.clone(),
            self.credentials.session_token.clone(),
            None,
            "environment",
        )
        .into();

        let params: aws_sigv4::http_request::SigningParams<'_> = v4::SigningParams::builder()
            .identity(&identity)
            .region(&self.region)
            .name(SERVICE)
            .time(SystemTime::now())
            .settings(SigningSettings::default())
            .build()
            .map_err(|e| ModelError::Signing(e.to_string()))?
            .into();

        let request = SignableRequest::new(
            "POST",
            url.as_str(),
            [("accept", "application/json"), ("content-type", "application/json")].into_iter(),
            SignableBody::Bytes(body),
        )
        .map_err(|e| ModelError::Signing(e.to_string()))?;

        let (instructions, _signature) = sign(request, &params)
            .map_err(|e| ModelError::Signing(e.to_string()))?
            .into_parts();

        Ok(instructions
            .headers()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect())
    }
}

#[async_trait]
impl TextModel for BedrockModel {
    async fn complete(&self, prompt: &str) -> Result<String, ModelError> {
        self.check_configured()?;
        let url = self.invoke_url()?;

        let body = serde_json::to_vec(&InvokeRequest {
            anthropic_version: ANTHROPIC_VERSION,
            max_tokens: self.max_tokens,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        })?;

        let signed = self.signed_headers(&url, &body)?;

        let mut request = self
            .client
            .post(url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json");
        for (name, value) in signed {
            request = request.header(name, value);
        }

        tracing::debug!(model = %self.model_id, "Invoking model");
        let response = request.body(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "Model invocation rejected");
            return Err(ModelError::HttpStatus { status, body });
        }

        let bytes = response.bytes().await?;
        let parsed: InvokeResponse = serde_json::from_slice(&bytes).map_err(|e| {
            tracing::error!(
                "Failed to parse model response: {}. Body: {}",
                e,
                String::from_utf8_lossy(&bytes)
            );
            ModelError::Decode(e)
        })?;

        parsed
            .content
            .into_iter()
            .next()
            .and_then(|block| block.text)
            .ok_or(ModelError::EmptyReply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn model_for(server: &MockServer) -> BedrockModel {
        model_with_token(server, None)
    }

    fn model_with_token(server: &MockServer, session_token: Option<&str>) -> BedrockModel {
        let config = Config {
            model_endpoint: Some(server.base_url()),
            model_id: "anthropic.test-model".to_string(),
            aws_credentials: AwsCredentials {
                access_key_id: "AKIDEXAMPLE".to_string(),
                secret_access_key: "secret".to_string(),
                session_token: session_token.map(str::to_string),
            },
            ..Config::default()
        };
        BedrockModel::from_config(&config)
    }

    #[tokio::test]
    async fn returns_first_text_block() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/model/anthropic.test-model/invoke")
                .header_exists("authorization")
                .header_exists("x-amz-date")
                .json_body(json!({
                    "anthropic_version": "bedrock-2023-05-31",
                    "max_tokens": 1000,
                    "messages": [{ "role": "user", "content": "hello" }]
                }));
            then.status(200).json_body(json!({
                "content": [{ "type": "text", "text": "hi there" }]
            }));
        });

        let reply = model_for(&server).complete("hello").await.unwrap();

        mock.assert();
        assert_eq!(reply, "hi there");
    }

    #[tokio::test]
    async fn session_token_is_sent_with_signed_request() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/model/anthropic.test-model/invoke")
                .header("x-amz-security-token", "session-token")
                .header_exists("authorization");
            then.status(200).json_body(json!({
                "content": [{ "type": "text", "text": "ok" }]
            }));
        });

        let reply = model_with_token(&server, Some("session-token"))
            .complete("hello")
            .await
            .unwrap();

        mock.assert();
        assert_eq!(reply, "ok");
    }

    #[test]
    fn model_id_is_one_encoded_path_segment() {
        let model = BedrockModel::from_config(&Config {
            model_endpoint: Some("https://bedrock.example/".to_string()),
            model_id: "us.anthropic.claude-3-5-sonnet-20241022-v2:0".to_string(),
            ..Config::default()
        });
        let url = model.invoke_url().unwrap();
        assert_eq!(
            url.as_str(),
            "https://bedrock.example/model/us.anthropic.claude-3-5-sonnet-20241022-v2%3A0/invoke"
        );
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST);
            then.status(403).body("bad signature");
        });

        let err = model_for(&server).complete("hello").await.unwrap_err();
        assert_eq!(err.kind(), "http_status");
        assert!(err.to_string().contains("bad signature"));
    }

    #[tokio::test]
    async fn missing_credentials_fail_before_any_request() {
        // Nothing listens on the discard port; a request would fail as "request".
        let model = BedrockModel::from_config(&Config {
            model_endpoint: Some("http://127.0.0.1:9".to_string()),
            ..Config::default()
        });
        let err = model.complete("hello").await.unwrap_err();

        assert_eq!(err.kind(), "not_configured");
        assert!(err.to_string().contains("AWS_ACCESS_KEY_ID"));
    }
}
