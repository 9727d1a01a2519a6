//! HuggingFace Inference API client.

use super::{GenerationOptions, Generator, LlmError};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub(crate) const HUGGINGFACE_BASE_URL: &str = "https://api-inference.huggingface.co/models";

/// Inference requests can queue while a model warms up
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: Parameters,
}

#[derive(Serialize)]
struct Parameters {
    max_new_tokens: u32,
}

/// Text-generation models answer with a list, some pipelines with one object
#[derive(Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Many(Vec<Generated>),
    One(Generated),
}

#[derive(Deserialize)]
struct Generated {
    #[serde(default)]
    generated_text: Option<String>,
}

pub struct HuggingFaceClient {
    base_url: String,
    api_key: String,
    models: Vec<String>,
}

impl HuggingFaceClient {
    pub fn new(base_url: String, api_key: String, models: Vec<String>) -> Self {
        Self {
            base_url,
            api_key,
            models,
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), model)
    }
}

impl Generator for HuggingFaceClient {
    fn list_models(&self) -> Vec<String> {
        self.models.clone()
    }

    /// The inference API has no cheap liveness check; failures surface on the first request.
    async fn check_connection(&self) -> bool {
        true
    }

    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        options: GenerationOptions,
    ) -> Result<Option<String>, LlmError> {
        let body = InferenceRequest {
            inputs: prompt,
            parameters: Parameters {
                max_new_tokens: options.max_tokens,
            },
        };

        let response = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?
            .post(self.endpoint(model))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status {
                provider: "huggingface".to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let raw = response.text().await?;
        let parsed: InferenceResponse =
            serde_json::from_str(&raw).map_err(|e| LlmError::ParseError(format!("{}: {}", e, raw)))?;

        let generated = match parsed {
            InferenceResponse::Many(items) => items.into_iter().next(),
            InferenceResponse::One(item) => Some(item),
        };
        Ok(generated.and_then(|g| g.generated_text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread;

    /// Read one HTTP request and return its request line and body
    fn read_request(stream: &mut TcpStream) -> (String, String) {
        let mut reader = BufReader::new(stream);
        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();
        let mut content_length = 0usize;
        let mut line = String::new();
        loop {
            line.clear();
            reader.read_line(&mut line).unwrap();
            let trimmed = line.trim_end();
            if trimmed.is_empty() {
                break;
            }
            if let Some((name, value)) = trimmed.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse().unwrap();
                }
            }
        }
        let mut body = vec![0u8; content_length];
        reader.read_exact(&mut body).unwrap();
        (request_line.trim_end().to_string(), String::from_utf8(body).unwrap())
    }

    fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, thread::JoinHandle<(String, String)>) {
        let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind");
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            let resp = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(resp.as_bytes()).unwrap();
            stream.flush().unwrap();
            request
        });
        (format!("http://{}/models", addr), handle)
    }

    fn client(base_url: String) -> HuggingFaceClient {
        HuggingFaceClient::new(
            base_url,
            "hf-key".into(),
            vec!["facebook/bart-large-cnn".into()],
        )
    }

    #[tokio::test]
    async fn list_reply_yields_first_generated_text() {
        let (url, handle) = serve_once("200 OK", r#"[{"generated_text":"Short summary."}]"#);
        let options = GenerationOptions {
            max_tokens: 512,
            temperature: 0.2,
        };
        let text = client(url)
            .generate("facebook/bart-large-cnn", "Summarise this", options)
            .await
            .unwrap();
        assert_eq!(text.as_deref(), Some("Short summary."));

        let (request_line, body) = handle.join().unwrap();
        assert!(request_line.starts_with("POST /models/facebook/bart-large-cnn "));
        let body: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["inputs"], "Summarise this");
        assert_eq!(body["parameters"]["max_new_tokens"], 512);
    }

    #[tokio::test]
    async fn object_reply_is_accepted() {
        let (url, handle) = serve_once("200 OK", r#"{"generated_text":"Object summary."}"#);
        let text = client(url)
            .generate("google/flan-t5-large", "p", GenerationOptions::default())
            .await
            .unwrap();
        assert_eq!(text.as_deref(), Some("Object summary."));
        handle.join().unwrap();
    }

    #[tokio::test]
    async fn empty_list_is_none() {
        let (url, handle) = serve_once("200 OK", "[]");
        let text = client(url)
            .generate("facebook/bart-large-cnn", "p", GenerationOptions::default())
            .await
            .unwrap();
        assert_eq!(text, None);
        handle.join().unwrap();
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let (url, handle) = serve_once(
            "503 Service Unavailable",
            r#"{"error":"Model is currently loading"}"#,
        );
        let err = client(url)
            .generate("facebook/bart-large-cnn", "p", GenerationOptions::default())
            .await
            .unwrap_err();
        match err {
            LlmError::Status {
                provider,
                status,
                body,
            } => {
                assert_eq!(provider, "huggingface");
                assert_eq!(status, 503);
                assert!(body.contains("currently loading"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
        handle.join().unwrap();
    }

    #[tokio::test]
    async fn connection_check_always_passes() {
        let client = client("http://127.0.0.1:9".into());
        assert!(client.check_connection().await);
    }
}
