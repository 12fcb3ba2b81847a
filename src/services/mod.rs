pub mod image;
pub mod openai; // chat-completion client
pub mod vision; // model seam + mock

pub use image::ImageUpload;
pub use openai::OpenAiClient;
pub use vision::VisionModel;
