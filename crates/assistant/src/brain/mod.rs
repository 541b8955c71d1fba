//! Question answering for utterances no command rule recognized

use std::sync::Arc;

use tracing::{error, info, warn};

pub mod providers;
pub use providers::{
    ChatConfig, ChatMessage, ChatRequest, LLMProviderTrait, OpenAICompatibleProvider,
    ProviderError,
};

use crate::config::Settings;

pub const SYSTEM_PROMPT: &str = "You are a concise, helpful voice assistant.";
pub const PLACEHOLDER_ANSWER: &str =
    "This is a placeholder response. Configure GROQ_API_KEY to enable rich answers.";
pub const UNREACHABLE_ANSWER: &str =
    "I had trouble reaching the AI service. Please try again later.";
pub const EMPTY_ANSWER: &str = "I couldn't generate a response right now.";

/// Answers free-form questions; always produces a presentable string
pub struct QuestionAnswerer {
    provider: Option<Arc<dyn LLMProviderTrait>>,
    config: ChatConfig,
}

impl QuestionAnswerer {
    pub fn new(provider: Option<Arc<dyn LLMProviderTrait>>, config: ChatConfig) -> Self {
        Self { provider, config }
    }

    /// Answerer without a language model; every answer is the placeholder
    pub fn offline() -> Self {
        Self::new(None, ChatConfig::default())
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let config = ChatConfig {
            model: settings.llm.model.clone(),
            temperature: settings.llm.temperature,
            max_tokens: settings.llm.max_tokens,
        };

        match settings.groq.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => {
                info!("Question answering enabled with model {}", config.model);
                let provider =
                    OpenAICompatibleProvider::new(Some(key.to_string()), settings.llm.endpoint.clone());
                Self::new(Some(Arc::new(provider)), config)
            }
            _ => {
                warn!("GROQ_API_KEY not configured; LLM Q&A will be basic.");
                Self::new(None, config)
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.provider
            .as_ref()
            .map(|p| p.is_configured())
            .unwrap_or(false)
    }

    pub async fn answer(&self, prompt: &str) -> String {
        let Some(provider) = self.provider.as_ref().filter(|p| p.is_configured()) else {
            return PLACEHOLDER_ANSWER.to_string();
        };

        let request = ChatRequest {
            messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)],
            config: self.config.clone(),
        };

        match provider.chat(request).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => EMPTY_ANSWER.to_string(),
            Err(e) => {
                error!("{} LLM call failed: {}", provider.name(), e);
                UNREACHABLE_ANSWER.to_string()
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::providers::{ChatRequest, LLMProviderTrait, ProviderError};

    /// Replies with a canned result and records prompts
    pub struct ScriptedProvider {
        pub reply: Result<String, u16>,
        pub requests: Mutex<Vec<ChatRequest>>,
    }

    impl ScriptedProvider {
        pub fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(status: u16) -> Self {
            Self {
                reply: Err(status),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LLMProviderTrait for ScriptedProvider {
        fn name(&self) -> &'static str {
            "Scripted"
        }

        fn is_configured(&self) -> bool {
            true
        }

        async fn chat(&self, request: ChatRequest) -> Result<String, ProviderError> {
            self.requests.lock().unwrap().push(request);
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(ProviderError::ApiError {
                    status: *status,
                    message: "scripted failure".to_string(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{testing::ScriptedProvider, *};
    use crate::brain::providers::MessageRole;

    #[tokio::test]
    async fn test_offline_answer_is_placeholder() {
        let answerer = QuestionAnswerer::offline();
        assert!(!answerer.is_enabled());
        assert_eq!(answerer.answer("why is the sky blue").await, PLACEHOLDER_ANSWER);
    }

    #[tokio::test]
    async fn test_answer_sends_system_and_user_prompt() {
        let provider = Arc::new(ScriptedProvider::replying(" Rayleigh scattering. "));
        let answerer = QuestionAnswerer::new(Some(provider.clone()), ChatConfig::default());

        let answer = answerer.answer("why is the sky blue").await;
        assert_eq!(answer, "Rayleigh scattering.");

        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].messages[0].role, MessageRole::System);
        assert_eq!(requests[0].messages[0].content, SYSTEM_PROMPT);
        assert_eq!(requests[0].messages[1], ChatMessage::user("why is the sky blue"));
    }

    #[tokio::test]
    async fn test_empty_answer_fallback() {
        let answerer =
            QuestionAnswerer::new(Some(Arc::new(ScriptedProvider::replying("   "))), ChatConfig::default());
        assert_eq!(answerer.answer("anything").await, EMPTY_ANSWER);
    }

    #[tokio::test]
    async fn test_provider_failure_fallback() {
        let answerer =
            QuestionAnswerer::new(Some(Arc::new(ScriptedProvider::failing(503))), ChatConfig::default());
        assert_eq!(answerer.answer("anything").await, UNREACHABLE_ANSWER);
    }

    #[test]
    fn test_from_settings_without_key_is_offline() {
        let mut settings = Settings::default();
        settings.groq.api_key = None;
        assert!(!QuestionAnswerer::from_settings(&settings).is_enabled());

        settings.groq.api_key = Some("gsk_test".to_string());
        assert!(QuestionAnswerer::from_settings(&settings).is_enabled());
    }
}
