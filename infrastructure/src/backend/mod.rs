//! Completion backends implementing [`LlmGateway`](tooloop_application::LlmGateway).

mod openai;

pub use openai::OpenAiCompatibleGateway;
