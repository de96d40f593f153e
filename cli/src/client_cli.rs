use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server responded {status}: {message}")]
    Server { status: StatusCode, message: String },
}

pub struct ClientCli {
    inner: Client,
    base_url: String,
}

impl ClientCli {
    pub fn new(server: &str) -> Self {
        Self {
            inner: Client::new(),
            base_url: server.trim_end_matches('/').to_string(),
        }
    }

    pub async fn submit(&self, name: &str, args: &[String]) -> Result<(), CliError> {
        let request = self
            .inner
            .post(self.url("/jobs"))
            .json(&json!({ "jobName": name, "arguments": args }));
        let response = send(request).await?;
        println!(
            "Started job id: {}",
            response["jobId"].as_str().unwrap_or("<unknown>")
        );
        Ok(())
    }

    pub async fn list(&self) -> Result<(), CliError> {
        print_json(&send(self.inner.get(self.url("/jobs"))).await?);
        Ok(())
    }

    pub async fn get(&self, job_id: &str) -> Result<(), CliError> {
        let url = self.url(&format!("/jobs/{}", job_id));
        print_json(&send(self.inner.get(url)).await?);
        Ok(())
    }

    pub async fn stats(&self) -> Result<(), CliError> {
        print_json(&send(self.inner.get(self.url("/stats"))).await?);
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Send the request, turning non-2xx responses into errors carrying the server's message.
async fn send(request: RequestBuilder) -> Result<Value, CliError> {
    let response = request.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }
    let body = response.text().await?;
    Err(CliError::Server {
        status,
        message: error_message(status, &body),
    })
}

/// Prefer the `error` field of a JSON body, then the raw body, then the status reason.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Some(message) = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("error")?.as_str().map(str::to_string))
    {
        return message;
    }
    match body.trim() {
        "" => status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.to_string()),
        text => text.to_string(),
    }
}

fn print_json(value: &Value) {
    println!("{:#}", value);
}
