// Application mode — the posture that decides whether local filtering runs.
//
// Shine is the public-friendly mode and gets the client-side profanity
// filter. Shadow is the anonymous venting mode and skips it. The remote
// moderation service is consulted in both modes.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The two operating modes of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Filtered, public-friendly mode (the default)
    #[default]
    Shine,
    /// Unfiltered, anonymous mode
    Shadow,
}

impl Mode {
    /// Human-readable label for UI display.
    pub fn display_name(self) -> &'static str {
        match self {
            Mode::Shine => "Shine",
            Mode::Shadow => "Shadow",
        }
    }

    /// Value used on the wire when talking to the backend.
    pub fn api_value(self) -> &'static str {
        match self {
            Mode::Shine => "light",
            Mode::Shadow => "dark",
        }
    }

    /// Parse a wire value. Case-insensitive; anything unrecognized
    /// (including an empty string) falls back to Shine.
    pub fn from_api_value(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case(Mode::Shadow.api_value()) {
            Mode::Shadow
        } else {
            Mode::Shine
        }
    }

    /// Whether the client-side filter runs in this mode.
    pub fn applies_client_filtering(self) -> bool {
        matches!(self, Mode::Shine)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl Serialize for Mode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.api_value())
    }
}

impl<'de> Deserialize<'de> for Mode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Mode::from_api_value(&raw))
    }
}
