//! Outbound side of CampusDesk: the Gemini gateway and what it sends.

pub mod attachment;
pub mod gemini_gateway;
pub mod prompts;

pub use attachment::load_attachment;
pub use gemini_gateway::GeminiGateway;
