use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Writing tone recorded on a document. Descriptive metadata only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Formal,
    Casual,
    Academic,
    Creative,
    Journalistic,
    Friendly,
}

impl Tone {
    pub const ALL: [Tone; 6] = [
        Tone::Formal,
        Tone::Casual,
        Tone::Academic,
        Tone::Creative,
        Tone::Journalistic,
        Tone::Friendly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Formal => "formal",
            Tone::Casual => "casual",
            Tone::Academic => "academic",
            Tone::Creative => "creative",
            Tone::Journalistic => "journalistic",
            Tone::Friendly => "friendly",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Tone::Formal => "Professional and structured",
            Tone::Casual => "Relaxed and conversational",
            Tone::Academic => "Scholarly and precise",
            Tone::Creative => "Imaginative and engaging",
            Tone::Journalistic => "Clear and factual",
            Tone::Friendly => "Warm and approachable",
        }
    }
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "formal" => Ok(Tone::Formal),
            "casual" => Ok(Tone::Casual),
            "academic" => Ok(Tone::Academic),
            "creative" => Ok(Tone::Creative),
            "journalistic" => Ok(Tone::Journalistic),
            "friendly" => Ok(Tone::Friendly),
            other => Err(format!("Invalid tone: {}", other)),
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
