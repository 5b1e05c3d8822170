use super::client::Message;
use std::collections::VecDeque;

/// Bounded chat history. The system message is kept apart and never trimmed.
#[derive(Debug, Clone)]
pub struct ConversationContext {
    messages: VecDeque<Message>,
    max_messages: usize,
    max_tokens: usize,
    system_message: Option<Message>,
}

impl ConversationContext {
    pub fn new(max_messages: usize, max_tokens: usize) -> Self {
        Self {
            messages: VecDeque::new(),
            max_messages,
            max_tokens,
            system_message: None,
        }
    }

    /// Create with default limits (20 messages, ~8000 tokens)
    pub fn with_defaults() -> Self {
        Self::new(20, 8000)
    }

    pub fn set_system_message(&mut self, content: impl Into<String>) {
        self.system_message = Some(Message::system(content));
    }

    pub fn add_user_message(&mut self, content: impl Into<String>) {
        self.add_message(Message::user(content));
    }

    pub fn add_assistant_message(&mut self, content: impl Into<String>) {
        self.add_message(Message::assistant(content));
    }

    pub fn add_message(&mut self, message: Message) {
        self.messages.push_back(message);
        self.trim_context();
    }

    /// Drop the most recent message, e.g. a user turn whose reply failed.
    pub fn pop_last(&mut self) -> Option<Message> {
        self.messages.pop_back()
    }

    /// Get all messages for API call (includes system message if set)
    pub fn get_messages(&self) -> Vec<Message> {
        self.system_message
            .iter()
            .chain(self.messages.iter())
            .cloned()
            .collect()
    }

    /// Clear all messages except system message
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Conversation length, excluding the system message.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    fn estimate_tokens(&self) -> usize {
        self.system_message
            .iter()
            .chain(self.messages.iter())
            .map(estimate_message_tokens)
            .sum()
    }

    fn trim_context(&mut self) {
        while self.messages.len() > self.max_messages {
            self.messages.pop_front();
        }

        // Always keep the newest message, even if it alone is over budget.
        while self.estimate_tokens() > self.max_tokens && self.messages.len() > 1 {
            self.messages.pop_front();
        }
    }

    /// Get context summary for debugging
    pub fn summary(&self) -> String {
        format!(
            "Context: {} messages, ~{} tokens (limits: {} messages, {} tokens)",
            self.len(),
            self.estimate_tokens(),
            self.max_messages,
            self.max_tokens
        )
    }
}

impl Default for ConversationContext {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Rough estimate: CJK text runs close to one token per character, so count
/// characters rather than bytes, plus a fixed overhead per message.
fn estimate_message_tokens(message: &Message) -> usize {
    message.content.chars().count() + 10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_creation() {
        let context = ConversationContext::new(5, 1000);
        assert_eq!(context.len(), 0);
        assert!(context.is_empty());
        assert_eq!(context.max_messages, 5);
        assert_eq!(context.max_tokens, 1000);
    }

    #[test]
    fn test_message_addition() {
        let mut context = ConversationContext::new(5, 1000);

        context.set_system_message("你是語音助手");
        context.add_user_message("你好");
        context.add_assistant_message("你好！");

        assert_eq!(context.len(), 2);

        let messages = context.get_messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[2].role, "assistant");
    }

    #[test]
    fn test_message_trimming() {
        let mut context = ConversationContext::new(3, 10000);

        for i in 0..5 {
            context.add_user_message(format!("Message {}", i));
        }

        assert_eq!(context.len(), 3);
        let messages = context.get_messages();
        assert_eq!(messages[0].content, "Message 2");
        assert_eq!(messages.last().unwrap().content, "Message 4");
    }

    #[test]
    fn test_token_trimming_keeps_newest() {
        let mut context = ConversationContext::new(10, 50);
        context.add_user_message("a".repeat(30));
        context.add_assistant_message("b".repeat(30));
        assert_eq!(context.len(), 1);
        assert!(context.get_messages()[0].content.starts_with('b'));

        context.add_user_message("c".repeat(200));
        assert_eq!(context.len(), 1);
    }

    #[test]
    fn test_pop_last_and_clear() {
        let mut context = ConversationContext::new(10, 10000);
        context.set_system_message("System");
        context.add_user_message("Hello");
        context.add_assistant_message("Hi");

        assert_eq!(context.pop_last().unwrap().content, "Hi");
        assert_eq!(context.len(), 1);

        context.clear();
        assert_eq!(context.len(), 0);
        let messages = context.get_messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, "system");
    }

    #[test]
    fn test_token_estimation_counts_characters() {
        assert_eq!(estimate_message_tokens(&Message::user("八字合婚")), 14);
    }
}
