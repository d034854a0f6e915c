pub mod conversation;
pub mod gateway;
pub mod gemini;
pub mod prompts;

pub use conversation::{ChatSession, ConversationTurn, Role, Transcript};
pub use gateway::{GenerateRequest, LlmGatewayError, SamplingParams, TextGateway};
pub use gemini::{GeminiClient, GeminiConfig, GeminiConfigError};
pub use prompts::{ContentAnalysis, ContentAnalysisKind, analyze_content, prompt_for};
