pub mod error;
pub mod model;
pub mod service;

pub use error::ContentServiceError;
pub use model::{
    CreateFaqRequest, CreateTopicRequest, Faq, FaqListItem, Topic, TopicListItem, TopicWithFaqs,
    DEFAULT_AVATAR_VIDEO_URL,
};
pub use service::{ContentService, ContentServiceApi};
