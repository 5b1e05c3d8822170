use super::client::{LLMError, Message, TextGenerator};
use super::context::ConversationContext;
use super::prompts::{FortunePrompt, SystemPrompts};
use crate::fortune::{Clock, FortuneReport, FortuneRequest};

/// Marker the reconnection advice starts at in a reading.
pub const RECONNECTION_MARKER: &str = "斷聯";

/// A computed report together with the model's narrative for it.
#[derive(Debug, Clone)]
pub struct FortuneReading {
    pub report: FortuneReport,
    pub reading: String,
}

impl FortuneReading {
    /// The reconnection advice: the tail of the reading from the first
    /// mention of the lost contact. `None` while the pair is still in touch
    /// or when the reading never mentions it.
    pub fn reconnection_advice(&self) -> Option<&str> {
        if self.report.still_in_contact {
            return None;
        }
        self.reading
            .find(RECONNECTION_MARKER)
            .map(|idx| &self.reading[idx..])
    }
}

/// Ask the generator for a narrative reading of `report`.
pub async fn request_reading(
    generator: &dyn TextGenerator,
    report: &FortuneReport,
) -> Result<String, LLMError> {
    let messages = vec![
        Message::system(SystemPrompts::fortune_master()),
        Message::user(FortunePrompt::render(report)),
    ];

    log::info!(
        "Requesting reading for {} & {}",
        report.person_a.record.name,
        report.person_b.record.name
    );
    generator.generate(messages).await
}

/// Compute the report for `request` as of `clock` and ask for its reading.
pub async fn read_fortune(
    generator: &dyn TextGenerator,
    request: &FortuneRequest,
    clock: &dyn Clock,
) -> crate::Result<FortuneReading> {
    let report = request.compute_with_clock(clock)?;
    let reading = request_reading(generator, &report).await?;
    Ok(FortuneReading { report, reading })
}

/// A running conversation with the voice chat persona.
pub struct ChatSession<G: TextGenerator> {
    generator: G,
    context: ConversationContext,
}

impl<G: TextGenerator> ChatSession<G> {
    pub fn new(generator: G) -> Self {
        Self::with_context(generator, ConversationContext::with_defaults())
    }

    pub fn with_context(generator: G, mut context: ConversationContext) -> Self {
        context.set_system_message(SystemPrompts::voice_chat());
        Self { generator, context }
    }

    pub fn context(&self) -> &ConversationContext {
        &self.context
    }

    /// Send one user turn and return the reply. A failed turn is removed
    /// from the history so the next attempt starts clean.
    pub async fn send(&mut self, user_input: &str) -> Result<String, LLMError> {
        let user_input = user_input.trim();
        if user_input.is_empty() {
            return Err(LLMError::EmptyMessage);
        }

        self.context.add_user_message(user_input);
        match self.generator.generate(self.context.get_messages()).await {
            Ok(reply) => {
                self.context.add_assistant_message(&reply);
                log::debug!("{}", self.context.summary());
                Ok(reply)
            }
            Err(e) => {
                self.context.pop_last();
                Err(e)
            }
        }
    }

    pub fn reset(&mut self) {
        self.context.clear();
    }
}
