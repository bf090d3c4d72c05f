pub mod combination;
pub mod tag;

pub use combination::Combination;
pub use tag::{GeneratePromptRequest, GeneratePromptResponse, PromptFormat, Tag};
