use async_trait::async_trait;
use log::debug;
use reqwest::{ Client as HttpClient, header::{ HeaderMap, HeaderValue, CONTENT_TYPE, AUTHORIZATION } };
use serde::{ Deserialize, Serialize };
use std::error::Error as StdError;

use super::{ ChatClient, ChatRequest, CompletionResponse };
use crate::llm::LlmConfig;
use crate::models::chat::Role;

const CHAT_COMPLETIONS_ROUTE: &str = "/v1/chat/completions";

pub struct OpenAIChatClient {
    http: HttpClient,
    base_url: String,
}

#[derive(Serialize)]
struct OpenAIMessage<'a> {
    role: Role,
    content: &'a str,
}

#[derive(Serialize)]
struct OpenAIChatRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAIMessage<'a>>,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Deserialize)]
struct OpenAIChoice {
    message: OpenAIReplyMessage,
}

#[derive(Deserialize)]
struct OpenAIReplyMessage {
    content: String,
}

impl<'a> OpenAIChatRequest<'a> {
    fn from_request(request: &ChatRequest<'a>) -> Self {
        let messages = request.messages
            .iter()
            .map(|m| OpenAIMessage {
                role: m.role(),
                content: m.content(),
            })
            .collect();

        Self {
            model: request.model.as_str(),
            messages,
        }
    }
}

fn first_choice_content(body: &str) -> Result<String, Box<dyn StdError + Send + Sync>> {
    let resp: OpenAIResponse = serde_json::from_str(body)?;
    let content = resp.choices
        .into_iter()
        .next()
        .ok_or_else(|| "No response from OpenAI API".to_string())?
        .message.content;
    Ok(content)
}

impl OpenAIChatClient {
    pub fn new(base_url: String, timeout: Option<std::time::Duration>) -> Result<Self, Box<dyn StdError + Send + Sync>> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = HttpClient::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| Box::new(e) as Box<dyn StdError + Send + Sync>)?;

        Ok(Self { http, base_url })
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, Box<dyn StdError + Send + Sync>> {
        Self::new(config.base_url.clone(), config.timeout)
    }

    fn completions_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if base.ends_with(CHAT_COMPLETIONS_ROUTE) {
            base.to_string()
        } else {
            format!("{}{}", base, CHAT_COMPLETIONS_ROUTE)
        }
    }
}

#[async_trait]
impl ChatClient for OpenAIChatClient {
    async fn complete(
        &self,
        request: ChatRequest<'_>
    ) -> Result<CompletionResponse, Box<dyn StdError + Send + Sync>> {
        let url = self.completions_url();
        let req = OpenAIChatRequest::from_request(&request);
        let auth = HeaderValue::from_str(&format!("Bearer {}", request.api_key)).map_err(
            |e| format!("Invalid API key format: {}", e)
        )?;

        debug!("POST {} with {} messages", url, req.messages.len());
        let body = self.http
            .post(&url)
            .header(AUTHORIZATION, auth)
            .json(&req)
            .send().await?
            .error_for_status()?
            .text().await?;

        let content = first_choice_content(&body)?;
        Ok(CompletionResponse { response: content })
    }
}
