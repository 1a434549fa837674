// Content-policy violation categories.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A category of content-policy breach.
///
/// Produced by the local classifier (which only knows profanity today) and
/// by the remote moderation service, which may report any of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ViolationType {
    Profanity,
    HateSpeech,
    Harassment,
    SexualContent,
    Violence,
    SelfHarm,
    Spam,
    /// A category the service reported that this build doesn't know about
    Other,
}

impl ViolationType {
    /// Parse a category name as sent by the moderation service.
    /// Case-insensitive; unknown names map to `Other`.
    pub fn from_api_value(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "profanity" => ViolationType::Profanity,
            "hate_speech" => ViolationType::HateSpeech,
            "harassment" => ViolationType::Harassment,
            "sexual_content" => ViolationType::SexualContent,
            "violence" => ViolationType::Violence,
            "self_harm" => ViolationType::SelfHarm,
            "spam" => ViolationType::Spam,
            _ => ViolationType::Other,
        }
    }

    /// Short description suitable for showing to the person who wrote the text.
    pub fn description(self) -> &'static str {
        match self {
            ViolationType::Profanity => "profanity",
            ViolationType::HateSpeech => "hate speech",
            ViolationType::Harassment => "harassment",
            ViolationType::SexualContent => "sexual content",
            ViolationType::Violence => "violent content",
            ViolationType::SelfHarm => "self-harm content",
            ViolationType::Spam => "spam",
            ViolationType::Other => "a content policy violation",
        }
    }
}

impl fmt::Display for ViolationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl<'de> Deserialize<'de> for ViolationType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(ViolationType::from_api_value(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_api_value_known_categories() {
        assert_eq!(ViolationType::from_api_value("profanity"), ViolationType::Profanity);
        assert_eq!(ViolationType::from_api_value("HATE_SPEECH"), ViolationType::HateSpeech);
        assert_eq!(ViolationType::from_api_value(" spam "), ViolationType::Spam);
    }

    #[test]
    fn test_from_api_value_unknown_is_other() {
        assert_eq!(ViolationType::from_api_value("doxxing"), ViolationType::Other);
        assert_eq!(ViolationType::from_api_value(""), ViolationType::Other);
    }

    #[test]
    fn test_serde_unknown_is_other() {
        let parsed: ViolationType = serde_json::from_str("\"doxxing\"").unwrap();
        assert_eq!(parsed, ViolationType::Other);
        let parsed: ViolationType = serde_json::from_str("\"self_harm\"").unwrap();
        assert_eq!(parsed, ViolationType::SelfHarm);
    }
}
