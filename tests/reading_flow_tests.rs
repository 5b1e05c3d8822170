use async_trait::async_trait;
use chrono::NaiveDate;
use fortune_match::fortune::{BirthRecord, FortuneRequest, Gender};
use fortune_match::llm::{
    request_reading, ChatSession, ConversationContext, FortunePrompt, LLMError, Message,
    SystemPrompts, TextGenerator,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Replays canned replies and records every request it receives.
#[derive(Clone, Default)]
struct Recorder {
    replies: Arc<Mutex<VecDeque<Result<String, LLMError>>>>,
    seen: Arc<Mutex<Vec<Vec<Message>>>>,
}

impl Recorder {
    fn with_replies(replies: Vec<Result<String, LLMError>>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into())),
            seen: Arc::default(),
        }
    }

    fn requests(&self) -> Vec<Vec<Message>> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for Recorder {
    async fn generate(&self, messages: Vec<Message>) -> Result<String, LLMError> {
        self.seen.lock().unwrap().push(messages);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("好".to_string()))
    }
}

#[tokio::test]
async fn test_reading_sends_persona_and_rendered_report() {
    let amy = BirthRecord::new("Amy", Gender::Female, 1990, 5, 15, 3).unwrap();
    let ben = BirthRecord::new("Ben", Gender::Male, 1988, 11, 2, 9).unwrap();
    let now = NaiveDate::from_ymd_opt(2026, 10, 19)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    let report = FortuneRequest::new(amy, ben, false).compute(now).unwrap();

    let generator = Recorder::with_replies(vec![Ok("兩位緣分不淺".to_string())]);
    let reading = request_reading(&generator, &report).await.unwrap();
    assert_eq!(reading, "兩位緣分不淺");

    let requests = generator.requests();
    assert_eq!(requests.len(), 1);
    let messages = &requests[0];
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0], Message::system(SystemPrompts::fortune_master()));
    assert_eq!(messages[1], Message::user(FortunePrompt::render(&report)));
    assert!(messages[1].content.contains("【特別分析】"));
}

#[tokio::test]
async fn test_reading_passes_errors_through() {
    let amy = BirthRecord::new("Amy", Gender::Female, 1990, 5, 15, 3).unwrap();
    let ben = BirthRecord::new("Ben", Gender::Male, 1988, 11, 2, 9).unwrap();
    let now = NaiveDate::from_ymd_opt(2026, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let report = FortuneRequest::new(amy, ben, true).compute(now).unwrap();

    let generator = Recorder::with_replies(vec![Err(LLMError::RateLimited)]);
    let result = request_reading(&generator, &report).await;
    assert!(matches!(result, Err(LLMError::RateLimited)));
}

#[tokio::test]
async fn test_chat_keeps_history_between_turns() {
    let generator = Recorder::with_replies(vec![
        Ok("你好！".to_string()),
        Err(LLMError::SafetyBlocked),
        Ok("今天天氣不錯。".to_string()),
    ]);
    let mut session = ChatSession::new(generator.clone());

    assert_eq!(session.send("  嗨  ").await.unwrap(), "你好！");
    assert!(matches!(
        session.send("不該說的話").await,
        Err(LLMError::SafetyBlocked)
    ));
    assert_eq!(session.send("天氣如何").await.unwrap(), "今天天氣不錯。");

    let requests = generator.requests();
    assert_eq!(requests.len(), 3);
    let last = &requests[2];
    assert_eq!(last[0], Message::system(SystemPrompts::voice_chat()));
    assert_eq!(last[1], Message::user("嗨"));
    assert_eq!(last[2], Message::assistant("你好！"));
    // The blocked turn was dropped from the history.
    assert_eq!(last[3], Message::user("天氣如何"));
    assert_eq!(last.len(), 4);
    assert_eq!(session.context().len(), 4);
}

#[tokio::test]
async fn test_chat_rejects_blank_input_without_calling_out() {
    let generator = Recorder::default();
    let mut session = ChatSession::new(generator.clone());

    assert!(matches!(session.send("   ").await, Err(LLMError::EmptyMessage)));
    assert!(generator.requests().is_empty());
    assert!(session.context().is_empty());
}

#[tokio::test]
async fn test_chat_history_is_bounded_and_resettable() {
    let generator = Recorder::default();
    let mut session =
        ChatSession::with_context(generator.clone(), ConversationContext::new(4, 8000));

    for turn in 0..5 {
        session.send(&format!("第{}句", turn)).await.unwrap();
    }
    assert_eq!(session.context().len(), 4);

    let last = generator.requests().pop().unwrap();
    assert!(last[0].is_system());
    assert!(!last.iter().any(|m| m.content == "第0句"));

    session.reset();
    assert!(session.context().is_empty());
    let messages = session.context().get_messages();
    assert_eq!(messages, vec![Message::system(SystemPrompts::voice_chat())]);
}

#[tokio::test]
#[cfg_attr(
    not(feature = "test-api"),
    ignore = "requires API key - run with --features test-api"
)]
async fn test_reading_against_gemini() {
    use fortune_match::config::load_config;
    use fortune_match::llm::{GeminiClient, LLMConfig};

    let config = load_config().expect("config should load");
    let key = config
        .resolve_key(None)
        .expect("This test requires GOOGLE_AI_API_KEY environment variable");
    let client = GeminiClient::with_config(
        key,
        LLMConfig {
            model: config.model.clone(),
            ..LLMConfig::default()
        },
    )
    .unwrap();

    let amy = BirthRecord::new("Amy", Gender::Female, 1990, 5, 15, 3).unwrap();
    let ben = BirthRecord::new("Ben", Gender::Male, 1988, 11, 2, 9).unwrap();
    let now = NaiveDate::from_ymd_opt(2026, 10, 19)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    let report = FortuneRequest::new(amy, ben, true).compute(now).unwrap();

    let reading = request_reading(&client, &report).await.unwrap();
    assert!(!reading.trim().is_empty());
    println!("✅ Reading received ({} chars)", reading.chars().count());
}
