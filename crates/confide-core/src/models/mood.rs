use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// How the author felt when writing a diary entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Happy,
    Sad,
    Anxious,
    Calm,
    Excited,
    Confused,
    Grateful,
}

impl Mood {
    /// Every mood, in the order the picker shows them.
    pub const ALL: [Mood; 7] = [
        Self::Happy,
        Self::Sad,
        Self::Anxious,
        Self::Calm,
        Self::Excited,
        Self::Confused,
        Self::Grateful,
    ];

    /// Convert to store string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Anxious => "anxious",
            Self::Calm => "calm",
            Self::Excited => "excited",
            Self::Confused => "confused",
            Self::Grateful => "grateful",
        }
    }

    /// Label shown next to an entry.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Happy => "😊 Feliz",
            Self::Sad => "😢 Triste",
            Self::Anxious => "😰 Ansioso/a",
            Self::Calm => "😌 Tranquilo/a",
            Self::Excited => "🤩 Emocionado/a",
            Self::Confused => "😕 Confundido/a",
            Self::Grateful => "🙏 Agradecido/a",
        }
    }

    /// Parses the optional mood field of a form, where an empty value means no mood.
    #[track_caller]
    pub fn parse_optional(value: &str) -> CoreErrorResult<Option<Self>> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(None);
        }
        Self::from_str(value).map(Some)
    }
}

impl FromStr for Mood {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreErrorResult<Self> {
        match s {
            "happy" => Ok(Self::Happy),
            "sad" => Ok(Self::Sad),
            "anxious" => Ok(Self::Anxious),
            "calm" => Ok(Self::Calm),
            "excited" => Ok(Self::Excited),
            "confused" => Ok(Self::Confused),
            "grateful" => Ok(Self::Grateful),
            _ => Err(CoreError::InvalidMood {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
