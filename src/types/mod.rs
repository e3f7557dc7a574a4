pub mod ask;
pub mod openai;

pub use ask::{AskRequest, AskResponse, ErrorResponse};
pub use openai::{first_choice_content, ChatCompletionRequest, ChatMessage};
