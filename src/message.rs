use serde::{Deserialize, Serialize};

/// The role of a chat message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One part of a multimodal content block, in the chat-completions wire shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

/// Message content: either a plain string or an ordered list of typed parts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

impl MessageContent {
    pub fn text(text: impl Into<String>) -> Self {
        MessageContent::Text(text.into())
    }

    /// Collapse a multimodal block to its plain-text part only.
    /// A block with no text part collapses to empty text.
    pub fn text_only(&self) -> MessageContent {
        match self {
            MessageContent::Text(_) => self.clone(),
            MessageContent::Parts(parts) => {
                let text = parts
                    .iter()
                    .find_map(|part| match part {
                        ContentPart::Text { text } => Some(text.clone()),
                        _ => None,
                    })
                    .unwrap_or_default();
                MessageContent::Text(text)
            }
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessageContent::Text(text) => Some(text),
            MessageContent::Parts(_) => None,
        }
    }
}

/// A chat message in the tutor conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: MessageContent,
    /// UI-only image reference; never serialized to the wire
    #[serde(skip)]
    pub display_image: Option<String>,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: MessageContent) -> Self {
        Self {
            role,
            content,
            display_image: None,
        }
    }

    pub fn with_display_image(role: ChatRole, content: MessageContent, url: impl Into<String>) -> Self {
        Self {
            role,
            content,
            display_image: Some(url.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_message_serializes_as_plain_string() {
        let message = ChatMessage::new(ChatRole::User, MessageContent::text("hello"));
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "hello");
        assert!(json.get("display_image").is_none());
    }

    #[test]
    fn test_parts_message_serializes_as_typed_array() {
        let content = MessageContent::Parts(vec![
            ContentPart::Text {
                text: "what is this".to_string(),
            },
            ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: "data:image/png;base64,AAAA".to_string(),
                },
            },
        ]);
        let json = serde_json::to_value(&content).unwrap();
        assert_eq!(json[0]["type"], "text");
        assert_eq!(json[0]["text"], "what is this");
        assert_eq!(json[1]["type"], "image_url");
        assert_eq!(json[1]["image_url"]["url"], "data:image/png;base64,AAAA");
    }

    #[test]
    fn test_text_only_keeps_plain_text() {
        let content = MessageContent::text("unchanged");
        assert_eq!(content.text_only(), MessageContent::text("unchanged"));
    }

    #[test]
    fn test_text_only_collapses_parts_to_first_text() {
        let content = MessageContent::Parts(vec![
            ContentPart::Text {
                text: "describe the diagram".to_string(),
            },
            ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: "data:image/png;base64,AAAA".to_string(),
                },
            },
        ]);
        assert_eq!(content.text_only(), MessageContent::text("describe the diagram"));
    }

    #[test]
    fn test_text_only_substitutes_empty_text_when_no_text_part() {
        let content = MessageContent::Parts(vec![ContentPart::ImageUrl {
            image_url: ImageUrl {
                url: "data:image/png;base64,AAAA".to_string(),
            },
        }]);
        assert_eq!(content.text_only(), MessageContent::text(""));
    }
}
