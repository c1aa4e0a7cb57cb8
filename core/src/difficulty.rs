use core::fmt;
use serde::{Deserialize, Serialize};

use crate::GameConfig;

/// The four fixed board presets, selected by the host's 1..=4 key bindings.
/// Switching presets always discards the running session; a live board is
/// never resized.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
    VeryHard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [Self::Easy, Self::Normal, Self::Hard, Self::VeryHard];

    /// Catalog lookup from the host key binding; anything outside 1..=4 is
    /// not a difficulty.
    pub const fn from_key(key: u8) -> Option<Self> {
        match key {
            1 => Some(Self::Easy),
            2 => Some(Self::Normal),
            3 => Some(Self::Hard),
            4 => Some(Self::VeryHard),
            _ => None,
        }
    }

    pub const fn config(self) -> GameConfig {
        match self {
            Self::Easy => GameConfig::new_unchecked((9, 9), 10),
            Self::Normal => GameConfig::new_unchecked((16, 16), 40),
            Self::Hard => GameConfig::new_unchecked((30, 16), 99),
            Self::VeryHard => GameConfig::new_unchecked((30, 24), 150),
        }
    }

    /// Stable name, also the key schema of the record file.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Normal => "Normal",
            Self::Hard => "Hard",
            Self::VeryHard => "VeryHard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
