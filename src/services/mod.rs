// Service exports
pub mod gemini;
pub mod profiles;

pub use gemini::{GeminiClient, GeminiError, GeminiScorer};
pub use profiles::{ProfileError, SkillProfileClient};
