//! Mood taxonomy used by journal entries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the user felt on a day. Ordered best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Calm,
    #[default]
    Neutral,
    Sad,
    Stressed,
}

impl Mood {
    /// Every mood, best first.
    pub const ALL: [Mood; 5] = [Mood::Happy, Mood::Calm, Mood::Neutral, Mood::Sad, Mood::Stressed];

    /// Stable identifier used in storage and on the command line.
    pub fn id(self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Calm => "calm",
            Mood::Neutral => "neutral",
            Mood::Sad => "sad",
            Mood::Stressed => "stressed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mood::Happy => "عالی",
            Mood::Calm => "آرام",
            Mood::Neutral => "معمولی",
            Mood::Sad => "غمگین",
            Mood::Stressed => "مضطرب",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Mood::Happy => "🤩",
            Mood::Calm => "😌",
            Mood::Neutral => "😐",
            Mood::Sad => "😔",
            Mood::Stressed => "😣",
        }
    }

    /// Color token of the day cell.
    pub fn color(self) -> &'static str {
        match self {
            Mood::Happy => "yellow-400",
            Mood::Calm => "teal-400",
            Mood::Neutral => "slate-300",
            Mood::Sad => "blue-300",
            Mood::Stressed => "orange-400",
        }
    }

    /// Score used for averaging, 5 (happy) down to 1 (stressed).
    pub fn score(self) -> u8 {
        match self {
            Mood::Happy => 5,
            Mood::Calm => 4,
            Mood::Neutral => 3,
            Mood::Sad => 2,
            Mood::Stressed => 1,
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Mood::ALL
            .into_iter()
            .find(|m| m.id() == wanted)
            .ok_or_else(|| {
                format!(
                    "unknown mood '{}': expected one of happy, calm, neutral, sad, stressed",
                    s
                )
            })
    }
}
