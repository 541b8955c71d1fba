//! Tests for the interaction loops

#[cfg(test)]
mod tests {
    use std::{
        cell::RefCell,
        collections::VecDeque,
        sync::{Arc, Mutex},
    };

    use async_trait::async_trait;

    use crate::{
        assistant::{Console, InteractionMode, VoiceAssistant, GOODBYE, HANDLER_FAILURE},
        brain::{testing::ScriptedProvider, ChatConfig, QuestionAnswerer, PLACEHOLDER_ANSWER},
        commands::{testing::RecordingLauncher, CommandRegistry},
        config::{ConfigError, Settings},
        router::CommandRouter,
        voice::{SpeechToText, TextToSpeech, VoiceError, VoiceResult},
        AssistantError,
    };

    /// Console fed from a script that records everything shown
    #[derive(Default)]
    struct ScriptedConsole {
        input: VecDeque<String>,
        shown: RefCell<Vec<(String, String)>>,
    }

    impl ScriptedConsole {
        fn with_input(lines: &[&str]) -> Self {
            Self {
                input: lines.iter().map(|l| l.to_string()).collect(),
                ..Self::default()
            }
        }

        fn lines_from(&self, kind: &str) -> Vec<String> {
            self.shown
                .borrow()
                .iter()
                .filter(|(k, _)| k == kind)
                .map(|(_, text)| text.clone())
                .collect()
        }

        fn assistant_lines(&self) -> Vec<String> {
            self.lines_from("assistant")
        }
    }

    impl Console for ScriptedConsole {
        fn show_message(&self, sender: &str, text: &str) {
            self.shown
                .borrow_mut()
                .push((sender.to_string(), text.to_string()));
        }

        fn show_status(&self, text: &str) {
            self.shown
                .borrow_mut()
                .push(("status".to_string(), text.to_string()));
        }

        fn show_error(&self, text: &str) {
            self.shown
                .borrow_mut()
                .push(("error".to_string(), text.to_string()));
        }

        fn read_command(&mut self) -> Option<String> {
            self.input.pop_front()
        }
    }

    /// Hears each scripted result once, then nothing
    struct ScriptedSTT {
        heard: Mutex<VecDeque<VoiceResult<String>>>,
        configured: bool,
    }

    impl ScriptedSTT {
        fn new(heard: Vec<VoiceResult<String>>) -> Self {
            Self {
                heard: Mutex::new(heard.into()),
                configured: true,
            }
        }
    }

    #[async_trait]
    impl SpeechToText for ScriptedSTT {
        fn is_configured(&self) -> bool {
            self.configured
        }

        async fn listen_once(&self) -> VoiceResult<String> {
            self.heard
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(VoiceError::NoSpeech))
        }
    }

    #[derive(Default)]
    struct RecordingTTS {
        spoken: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TextToSpeech for RecordingTTS {
        async fn speak(&self, text: &str) -> VoiceResult<()> {
            self.spoken.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    fn heard(text: &str) -> VoiceResult<String> {
        Ok(text.to_string())
    }

    fn create_test_assistant(
        launcher: RecordingLauncher,
        answerer: QuestionAnswerer,
        stt: Vec<VoiceResult<String>>,
    ) -> (VoiceAssistant, Arc<RecordingTTS>) {
        let router = CommandRouter::new(Arc::new(CommandRegistry::new(Arc::new(launcher))));
        let tts = Arc::new(RecordingTTS::default());
        let assistant = VoiceAssistant::new(
            Settings::default(),
            router,
            answerer,
            Arc::new(ScriptedSTT::new(stt)),
            tts.clone(),
        );
        (assistant, tts)
    }

    fn offline_assistant() -> (VoiceAssistant, Arc<RecordingTTS>) {
        create_test_assistant(
            RecordingLauncher::default(),
            QuestionAnswerer::offline(),
            Vec::new(),
        )
    }

    /// Test that a recognized command is shown and spoken
    #[tokio::test]
    async fn test_handle_command_shows_then_speaks() {
        let (assistant, tts) = offline_assistant();
        let console = ScriptedConsole::default();

        let reply = assistant.handle_command(&console, "What time is it").await;

        assert!(reply.text.starts_with("The time is "));
        assert!(reply.suggestions.is_empty());
        assert_eq!(console.assistant_lines(), vec![reply.text.clone()]);
        assert_eq!(*tts.spoken.lock().unwrap(), vec![reply.text]);
    }

    /// Test the suggestion notice precedes the fallback answer
    #[tokio::test]
    async fn test_unrecognized_with_suggestions() {
        let (assistant, tts) = offline_assistant();
        let console = ScriptedConsole::default();

        let reply = assistant.handle_command(&console, "tme").await;

        assert_eq!(reply.suggestions.first().map(String::as_str), Some("time"));
        assert_eq!(reply.text, PLACEHOLDER_ANSWER);

        let lines = console.assistant_lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("I didn't recognize that command. Did you mean: time"));
        assert!(lines[0].ends_with("? I'll also try to answer it as a question."));
        assert_eq!(lines[1], PLACEHOLDER_ANSWER);

        // only the answer is spoken
        assert_eq!(*tts.spoken.lock().unwrap(), vec![PLACEHOLDER_ANSWER.to_string()]);
    }

    /// Test unrecognized input without close commands goes straight to the answer
    #[tokio::test]
    async fn test_unrecognized_without_suggestions() {
        let provider = Arc::new(ScriptedProvider::replying("Forty-two."));
        let (assistant, _) = create_test_assistant(
            RecordingLauncher::default(),
            QuestionAnswerer::new(Some(provider.clone()), ChatConfig::default()),
            Vec::new(),
        );
        let console = ScriptedConsole::default();

        let reply = assistant.handle_command(&console, "xyz123 nonsense").await;

        assert_eq!(reply.text, "Forty-two.");
        assert!(reply.suggestions.is_empty());
        assert_eq!(console.assistant_lines(), vec!["Forty-two.".to_string()]);
        assert_eq!(provider.requests.lock().unwrap().len(), 1);
    }

    /// Test a failing handler becomes an apology and does not end the loop
    #[tokio::test]
    async fn test_handler_failure_is_contained() {
        let (assistant, _) = create_test_assistant(
            RecordingLauncher::failing(),
            QuestionAnswerer::offline(),
            Vec::new(),
        );
        let mut console = ScriptedConsole::with_input(&["search rust borrowing", "hello"]);

        assistant.run_text_loop(&mut console).await;

        let lines = console.assistant_lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], HANDLER_FAILURE);
        assert!(lines[1].starts_with("Good "));
    }

    /// Test a search reply with a working launcher
    #[tokio::test]
    async fn test_search_reply() {
        let (assistant, _) = offline_assistant();
        let reply = assistant.reply_to("Google borrow checker").await;
        assert_eq!(reply.text, "Searching the web for 'borrow checker'.");
    }

    #[tokio::test]
    async fn test_reply_to_exit() {
        let (assistant, tts) = offline_assistant();
        assert_eq!(assistant.reply_to("Quit").await.text, GOODBYE);
        assert!(tts.spoken.lock().unwrap().is_empty());
    }

    /// Test blank lines are skipped and exit stops reading
    #[tokio::test]
    async fn test_text_loop_exit() {
        let (assistant, _) = offline_assistant();
        let mut console = ScriptedConsole::with_input(&["", "   ", "hello", "quit", "time"]);

        assistant.run(&mut console, InteractionMode::Text).await;

        let lines = console.assistant_lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Good "));
        assert_eq!(lines[1], GOODBYE);
        // "time" was never read
        assert_eq!(console.input.len(), 1);
    }

    #[tokio::test]
    async fn test_text_loop_ends_on_eof() {
        let (assistant, _) = offline_assistant();
        let mut console = ScriptedConsole::with_input(&["hello"]);

        assistant.run_text_loop(&mut console).await;

        let lines = console.assistant_lines();
        assert_eq!(lines.len(), 1);
        assert!(!lines.contains(&GOODBYE.to_string()));
    }

    /// Test the wake word gates command capture
    #[tokio::test]
    async fn test_voice_loop_wake_word_flow() {
        let (assistant, tts) = create_test_assistant(
            RecordingLauncher::default(),
            QuestionAnswerer::offline(),
            vec![
                heard("hello there"),
                heard("Hey Assistant"),
                heard("what time is it"),
                heard("exit"),
            ],
        );
        let mut console = ScriptedConsole::default();

        assistant.run(&mut console, InteractionMode::Voice).await;

        let statuses = console.lines_from("status");
        assert!(statuses.iter().any(|s| s.starts_with("That wasn't the wake word")));
        assert!(statuses.iter().any(|s| s.starts_with("Wake word detected")));

        let users = console.lines_from("user");
        assert_eq!(
            users,
            vec!["hello there", "Hey Assistant", "what time is it", "exit"]
        );

        let lines = console.assistant_lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("The time is "));
        assert_eq!(lines[1], GOODBYE);
        assert_eq!(tts.spoken.lock().unwrap().len(), 1);
    }

    /// Test recognition failures are reported and listening continues
    #[tokio::test]
    async fn test_voice_loop_recovers_from_failures() {
        let (assistant, _) = create_test_assistant(
            RecordingLauncher::default(),
            QuestionAnswerer::offline(),
            vec![
                Err(VoiceError::NoSpeech),
                heard("hey assistant"),
                Err(VoiceError::STTError("timeout".to_string())),
                heard("hey assistant"),
                heard("stop"),
            ],
        );
        let mut console = ScriptedConsole::default();

        assistant.run_voice_loop(&mut console).await;

        assert_eq!(
            console.lines_from("error"),
            vec![
                "I didn't catch that. Let's try again.",
                "I couldn't hear your command."
            ]
        );
        assert_eq!(console.assistant_lines(), vec![GOODBYE.to_string()]);
    }

    /// Test voice mode gives up when nothing is ever heard
    #[tokio::test]
    async fn test_voice_loop_gives_up_after_repeated_failures() {
        let (assistant, _) = offline_assistant();
        let mut console = ScriptedConsole::default();

        assistant.run_voice_loop(&mut console).await;

        let errors = console.lines_from("error");
        assert_eq!(errors.len(), 6);
        assert!(errors[5].starts_with("Voice input keeps failing"));
        assert!(console.assistant_lines().is_empty());
    }

    /// Test voice mode refuses to listen without transcription credentials
    #[tokio::test]
    async fn test_voice_loop_requires_configured_stt() {
        let router = CommandRouter::new(Arc::new(CommandRegistry::new(Arc::new(
            RecordingLauncher::default(),
        ))));
        let stt = Arc::new(ScriptedSTT {
            heard: Mutex::new(vec![heard("hey assistant")].into()),
            configured: false,
        });
        let assistant = VoiceAssistant::new(
            Settings::default(),
            router,
            QuestionAnswerer::offline(),
            stt.clone(),
            Arc::new(RecordingTTS::default()),
        );
        let mut console = ScriptedConsole::default();

        assistant.run(&mut console, InteractionMode::Voice).await;

        let errors = console.lines_from("error");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("GROQ_API_KEY"));
        assert!(console.lines_from("user").is_empty());
        // nothing was consumed from the microphone
        assert_eq!(stt.heard.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_from_settings_rejects_invalid_settings() {
        let mut settings = Settings::default();
        settings.tts.volume = 2.0;

        match VoiceAssistant::from_settings(settings) {
            Err(AssistantError::Config(ConfigError::Invalid { key, .. })) => {
                assert_eq!(key, "tts.volume")
            }
            Err(other) => panic!("expected invalid tts.volume, got {}", other),
            Ok(_) => panic!("invalid settings were accepted"),
        }
    }
}
