use crate::error::AnalysisError;
use crate::services::image::ImageUpload;

/// Seam between the pipeline and the hosted model. Both calls return the raw
/// reply text; all parsing lives in `crate::parser` so it can be tested
/// without any transport.
#[async_trait::async_trait]
pub trait VisionModel: Send + Sync {
    /// First remote call: send the image, get back a plain-text listing of
    /// detected food items and quantities.
    async fn list_food_items(&self, image: &ImageUpload) -> Result<String, AnalysisError>;

    /// Per-item follow-up call returning a calorie/protein estimate as text.
    async fn nutrition_for(&self, item_name: &str) -> Result<String, AnalysisError>;
}

/// Canned-reply backend for exercising the pipeline without a network.
///
/// Vision replies are consumed in order, one per `list_food_items` call, so
/// a test can script a failure followed by a success.
#[cfg(test)]
pub struct MockVisionModel {
    items_replies: std::sync::Mutex<std::collections::VecDeque<Result<String, AnalysisError>>>,
    nutrition_replies: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl MockVisionModel {
    pub fn new(
        items_replies: Vec<Result<String, AnalysisError>>,
        nutrition_replies: &[(&str, &str)],
    ) -> Self {
        Self {
            items_replies: std::sync::Mutex::new(items_replies.into_iter().collect()),
            nutrition_replies: nutrition_replies
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn http_error(status: u16) -> AnalysisError {
        AnalysisError::Api {
            status,
            body: "mock failure".to_string(),
        }
    }
}

#[cfg(test)]
#[async_trait::async_trait]
impl VisionModel for MockVisionModel {
    async fn list_food_items(&self, _image: &ImageUpload) -> Result<String, AnalysisError> {
        self.items_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(AnalysisError::MalformedReply))
    }

    async fn nutrition_for(&self, item_name: &str) -> Result<String, AnalysisError> {
        self.nutrition_replies
            .get(item_name)
            .cloned()
            .ok_or(AnalysisError::MalformedReply)
    }
}
