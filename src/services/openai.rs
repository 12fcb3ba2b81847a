use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::AnalysisError;
use crate::models::TokenUsage;
use crate::services::image::ImageUpload;
use crate::services::vision::VisionModel;

// Published gpt-4o-mini rates used for the per-run cost estimate.
const INPUT_COST_PER_MTOK: f64 = 0.150;
const OUTPUT_COST_PER_MTOK: f64 = 0.600;
const VISION_COST_PER_IMAGE: f64 = 0.002125;

const ITEMS_PROMPT: &str = "Please provide a list of food items detected in the image along with \
     their approximate quantities. Only include the food items and their quantities, and avoid \
     any introduction, conclusion, or bullet points. Format as 'Item: Quantity'.";

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ContentPart {
    Text {
        #[serde(rename = "type")]
        content_type: String,
        text: String,
    },
    ImageUrl {
        #[serde(rename = "type")]
        content_type: String,
        image_url: ImageData,
    },
}

#[derive(Debug, Serialize)]
struct ImageData {
    url: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<TokenUsage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Debug, Deserialize)]
struct MessageContent {
    content: String,
}

/// Client for an OpenAI-compatible chat-completion endpoint.
pub struct OpenAiClient {
    api_key: String,
    model: String,
    api_url: String,
    max_tokens: u32,
    client: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            api_url: config.api_url.clone(),
            max_tokens: config.max_tokens,
            client: reqwest::Client::new(),
        }
    }

    fn text_part(text: String) -> ContentPart {
        ContentPart::Text {
            content_type: "text".to_string(),
            text,
        }
    }

    async fn send(&self, request: &ChatRequest) -> Result<(String, Option<TokenUsage>), AnalysisError> {
        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        log::debug!("📥 Chat-completion response status: {}", status);

        let body = response.text().await?;
        if !status.is_success() {
            log::error!("❌ API error response: {}", body);
            return Err(AnalysisError::Api {
                status: status.as_u16(),
                body,
            });
        }

        extract_reply(&body)
    }
}

#[async_trait::async_trait]
impl VisionModel for OpenAiClient {
    async fn list_food_items(&self, image: &ImageUpload) -> Result<String, AnalysisError> {
        log::info!(
            "🤖 Sending vision request for {} with model {}",
            image.path().display(),
            self.model
        );

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: vec![
                    Self::text_part(ITEMS_PROMPT.to_string()),
                    ContentPart::ImageUrl {
                        content_type: "image_url".to_string(),
                        image_url: ImageData {
                            url: image.data_url(),
                        },
                    },
                ],
            }],
            max_tokens: Some(self.max_tokens),
        };

        let (reply, usage) = self.send(&request).await?;

        if let Some(usage) = usage {
            let input_cost = usage.prompt_tokens as f64 / 1_000_000.0 * INPUT_COST_PER_MTOK;
            let output_cost = usage.completion_tokens as f64 / 1_000_000.0 * OUTPUT_COST_PER_MTOK;
            log::info!(
                "🧾 Tokens: {} in / {} out / {} total, estimated cost ${:.4}",
                usage.prompt_tokens,
                usage.completion_tokens,
                usage.total_tokens,
                input_cost + output_cost + VISION_COST_PER_IMAGE
            );
        }

        log::debug!("💬 Vision reply: {}", reply);
        Ok(reply)
    }

    async fn nutrition_for(&self, item_name: &str) -> Result<String, AnalysisError> {
        log::debug!("🤖 Requesting nutrition estimate for '{}'", item_name);

        let prompt = format!(
            "Provide the estimated calorie and protein content for the following item: '{}'. \
             Include calories and protein in a concise format (e.g., 'Calories: 100 kcal, \
             Protein: 5 g').",
            item_name
        );

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: vec![Self::text_part(prompt)],
            }],
            max_tokens: None,
        };

        let (reply, _) = self.send(&request).await?;
        log::debug!("💬 Nutrition reply for '{}': {}", item_name, reply);
        Ok(reply)
    }
}

/// Pull the reply text and usage counts out of a raw response body. A body
/// that does not decode, or decodes without a first choice, is the single
/// malformed-payload condition.
fn extract_reply(body: &str) -> Result<(String, Option<TokenUsage>), AnalysisError> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|_| AnalysisError::MalformedReply)?;

    let reply = response
        .choices
        .into_iter()
        .next()
        .ok_or(AnalysisError::MalformedReply)?
        .message
        .content;

    Ok((reply, response.usage))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_reply() {
        let body = r#"{
            "choices": [{"message": {"content": "Apple: 1 medium"}}],
            "usage": {"prompt_tokens": 100, "completion_tokens": 20, "total_tokens": 120}
        }"#;

        let (reply, usage) = extract_reply(body).unwrap();

        assert_eq!(reply, "Apple: 1 medium");
        assert_eq!(usage.unwrap().total_tokens, 120);
    }

    #[test]
    fn test_extract_reply_without_usage() {
        let body = r#"{"choices": [{"message": {"content": "Calories: 95 kcal"}}]}"#;

        let (reply, usage) = extract_reply(body).unwrap();

        assert_eq!(reply, "Calories: 95 kcal");
        assert!(usage.is_none());
    }

    #[test]
    fn test_extract_reply_empty_choices_is_malformed() {
        let err = extract_reply(r#"{"choices": []}"#).unwrap_err();

        assert!(matches!(err, AnalysisError::MalformedReply));
    }

    #[test]
    fn test_extract_reply_garbage_is_malformed() {
        let err = extract_reply("upstream proxy error").unwrap_err();

        assert!(matches!(err, AnalysisError::MalformedReply));
    }

    #[test]
    fn test_request_serialization_shape() {
        let request = ChatRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: vec![
                    OpenAiClient::text_part("look".to_string()),
                    ContentPart::ImageUrl {
                        content_type: "image_url".to_string(),
                        image_url: ImageData {
                            url: "data:image/jpeg;base64,aGk=".to_string(),
                        },
                    },
                ],
            }],
            max_tokens: Some(300),
        };

        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["max_tokens"], 300);
        assert_eq!(value["messages"][0]["content"][0]["type"], "text");
        assert_eq!(value["messages"][0]["content"][1]["type"], "image_url");
        assert_eq!(
            value["messages"][0]["content"][1]["image_url"]["url"],
            "data:image/jpeg;base64,aGk="
        );
    }

    #[test]
    fn test_text_only_request_omits_max_tokens() {
        let request = ChatRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![],
            max_tokens: None,
        };

        let value = serde_json::to_value(&request).unwrap();

        assert!(value.get("max_tokens").is_none());
    }
}
