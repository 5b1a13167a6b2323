use serde::{Deserialize, Serialize};

/// Discriminates what an embedding row was derived from: a document chunk
/// or a persisted chat turn. Stored as lowercase text in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentKind {
    File,
    Chat,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::File => "file",
            ContentKind::Chat => "chat",
        }
    }

    pub fn parse(value: &str) -> Result<Self, String> {
        match value {
            "file" => Ok(ContentKind::File),
            "chat" => Ok(ContentKind::Chat),
            other => Err(format!("Unknown content kind: {}", other)),
        }
    }

    /// Tag used when rendering a retrieved passage into the prompt.
    pub fn prompt_tag(&self) -> String {
        self.as_str().to_uppercase()
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        assert_eq!(ContentKind::parse("file").unwrap(), ContentKind::File);
        assert_eq!(ContentKind::parse("chat").unwrap(), ContentKind::Chat);
        assert!(ContentKind::parse("video").is_err());
    }

    #[test]
    fn test_prompt_tag_is_uppercased() {
        assert_eq!(ContentKind::File.prompt_tag(), "FILE");
        assert_eq!(ContentKind::Chat.prompt_tag(), "CHAT");
    }
}
