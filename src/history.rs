use log::warn;

use crate::message::{ChatMessage, ChatRole, MessageContent};

/// Full display history of a tutoring conversation.
///
/// The stored turns keep display-only fields (image previews, multimodal
/// blocks) with full fidelity; `transmission_payload` derives the sanitized
/// copy that is actually sent to the completion service.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    turns: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, role: ChatRole, content: MessageContent) {
        self.turns.push(ChatMessage::new(role, content));
    }

    pub fn append_with_image(
        &mut self,
        role: ChatRole,
        content: MessageContent,
        display_url: impl Into<String>,
    ) {
        self.turns
            .push(ChatMessage::with_display_image(role, content, display_url));
    }

    pub fn turns(&self) -> &[ChatMessage] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.turns.last()
    }

    /// Build the payload sent to the completion service.
    ///
    /// Every turn is deep-copied with its display image stripped and any
    /// multimodal block collapsed to its text part, so old images are never
    /// replayed against the service. When `inject` is given, it replaces the
    /// content of the last turn, but only if that turn belongs to the user;
    /// an injection onto any other turn is skipped and logged.
    pub fn transmission_payload(&self, inject: Option<MessageContent>) -> Vec<ChatMessage> {
        let mut payload: Vec<ChatMessage> = self
            .turns
            .iter()
            .map(|turn| {
                let mut copy = turn.clone();
                copy.display_image = None;
                copy.content = copy.content.text_only();
                copy
            })
            .collect();

        if let Some(content) = inject {
            match payload.last_mut() {
                Some(last) if last.role == ChatRole::User => last.content = content,
                _ => warn!("multimodal injection skipped: last turn is not a user turn"),
            }
        }

        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{ContentPart, ImageUrl};

    fn image_part(url: &str) -> ContentPart {
        ContentPart::ImageUrl {
            image_url: ImageUrl {
                url: url.to_string(),
            },
        }
    }

    #[test]
    fn test_payload_strips_display_images() {
        let mut history = Conversation::new();
        history.append_with_image(
            ChatRole::User,
            MessageContent::text("look at this"),
            "data:image/png;base64,AAAA",
        );

        let payload = history.transmission_payload(None);
        assert_eq!(payload.len(), 1);
        assert!(payload[0].display_image.is_none());
        // Canonical history keeps the display reference
        assert!(history.turns()[0].display_image.is_some());
    }

    #[test]
    fn test_payload_collapses_multimodal_turns_to_text() {
        let mut history = Conversation::new();
        history.append(
            ChatRole::User,
            MessageContent::Parts(vec![
                ContentPart::Text {
                    text: "what is in the picture".to_string(),
                },
                image_part("data:image/jpeg;base64,BBBB"),
            ]),
        );
        history.append(ChatRole::Assistant, MessageContent::text("a cat"));

        let payload = history.transmission_payload(None);
        assert_eq!(
            payload[0].content,
            MessageContent::text("what is in the picture")
        );
        assert_eq!(payload[1].content, MessageContent::text("a cat"));
        // Stored turn still carries the full multimodal block
        assert!(matches!(
            history.turns()[0].content,
            MessageContent::Parts(_)
        ));
    }

    #[test]
    fn test_injection_replaces_trailing_user_turn() {
        let mut history = Conversation::new();
        history.append(ChatRole::User, MessageContent::text("first"));
        history.append(ChatRole::Assistant, MessageContent::text("reply"));
        history.append(ChatRole::User, MessageContent::text("second"));

        let block = MessageContent::Parts(vec![
            ContentPart::Text {
                text: "second".to_string(),
            },
            image_part("data:image/png;base64,CCCC"),
        ]);
        let payload = history.transmission_payload(Some(block.clone()));
        assert_eq!(payload[2].content, block);
        // Earlier turns are untouched
        assert_eq!(payload[0].content, MessageContent::text("first"));
        // Canonical history is untouched
        assert_eq!(history.turns()[2].content, MessageContent::text("second"));
    }

    #[test]
    fn test_injection_skipped_when_last_turn_is_assistant() {
        let mut history = Conversation::new();
        history.append(ChatRole::User, MessageContent::text("question"));
        history.append(ChatRole::Assistant, MessageContent::text("answer"));

        let block = MessageContent::Parts(vec![image_part("data:image/png;base64,DDDD")]);
        let payload = history.transmission_payload(Some(block));
        assert_eq!(payload[1].content, MessageContent::text("answer"));
    }

    #[test]
    fn test_injection_skipped_on_empty_history() {
        let history = Conversation::new();
        let block = MessageContent::text("orphan");
        assert!(history.transmission_payload(Some(block)).is_empty());
    }
}
