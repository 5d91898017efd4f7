//! Tutor dialogue: persona-grounded chat over the conversation history,
//! with optional course context and vision attachments.

use crate::groq::{ChatCompletion, CompletionRequest};
use crate::history::Conversation;
use crate::message::{ChatMessage, ChatRole, ContentPart, ImageUrl, MessageContent};
use crate::models;
use crate::prompts;

/// One uploaded image, already base64-encoded by the caller
#[derive(Debug, Clone)]
pub struct ImageAttachment {
    pub mime_type: String,
    pub base64_data: String,
}

impl ImageAttachment {
    pub fn new(mime_type: impl Into<String>, base64_data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            base64_data: base64_data.into(),
        }
    }

    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64_data)
    }
}

/// The tutor dialogue component.
///
/// Owns the conversation history and borrows the completion service.
/// Service failures are absorbed into a templated error turn so the
/// conversation continues in a degraded state instead of surfacing an error
/// to the caller.
pub struct Tutor<'a, C: ChatCompletion> {
    client: &'a C,
    history: Conversation,
}

impl<'a, C: ChatCompletion> Tutor<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self {
            client,
            history: Conversation::new(),
        }
    }

    pub fn history(&self) -> &Conversation {
        &self.history
    }

    /// Text-only exchange, optionally grounded in course material
    pub async fn ask(&mut self, user_text: &str, model: &str, course_context: &str) -> String {
        self.history
            .append(ChatRole::User, MessageContent::text(user_text));

        let reply = self
            .request(model, models::CHAT_MAX_TOKENS, None, course_context)
            .await;

        self.history
            .append(ChatRole::Assistant, MessageContent::text(reply.clone()));
        reply
    }

    /// Vision exchange: the user text is interleaved with every image as a
    /// data URL and injected into the transmission payload. Only the first
    /// image is kept as the display reference on the stored turn.
    pub async fn ask_vision(
        &mut self,
        user_text: &str,
        images: &[ImageAttachment],
        model: &str,
    ) -> String {
        match images.first() {
            Some(first) => self.history.append_with_image(
                ChatRole::User,
                MessageContent::text(user_text),
                first.data_url(),
            ),
            None => self
                .history
                .append(ChatRole::User, MessageContent::text(user_text)),
        }

        let mut parts = vec![ContentPart::Text {
            text: user_text.to_string(),
        }];
        for image in images {
            parts.push(ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: image.data_url(),
                },
            });
        }

        let reply = self
            .request(
                model,
                models::VISION_MAX_TOKENS,
                Some(MessageContent::Parts(parts)),
                "",
            )
            .await;

        self.history
            .append(ChatRole::Assistant, MessageContent::text(reply.clone()));
        reply
    }

    async fn request(
        &self,
        model: &str,
        max_tokens: u32,
        inject: Option<MessageContent>,
        course_context: &str,
    ) -> String {
        let mut messages = vec![ChatMessage::new(
            ChatRole::System,
            MessageContent::text(prompts::system_prompt(course_context)),
        )];
        messages.extend(self.history.transmission_payload(inject));

        let request =
            CompletionRequest::new(model, messages, models::CHAT_TEMPERATURE, max_tokens);

        match self.client.complete(&request).await {
            Ok(reply) => reply,
            Err(e) => format!("API error ({}): {}", model, e),
        }
    }
}
