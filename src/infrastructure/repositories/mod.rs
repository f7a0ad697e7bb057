pub mod faq_repository;
pub mod openai_synthesis_repository;
pub mod polly_synthesis_repository;
pub mod synthesis_repository;
pub mod text_batches;
pub mod topic_repository;

pub use faq_repository::FaqRepository;
pub use openai_synthesis_repository::OpenAiSynthesisRepository;
pub use polly_synthesis_repository::PollySynthesisRepository;
pub use synthesis_repository::SynthesisRepository;
pub use topic_repository::TopicRepository;
