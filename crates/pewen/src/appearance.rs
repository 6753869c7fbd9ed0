//! Mood and growth stage derived from health

use std::fmt;

use crate::state::Health;

/// Symbol drawn when no tree is on loan.
pub const IDLE_SYMBOL: &str = "🪴";

/// How the tree feels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mood {
    /// Health above 66
    Happy,
    /// Health in 34..=66
    Neutral,
    /// Health at or below 33
    Sad,
}

impl Mood {
    /// Lowercase label.
    pub fn label(self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Neutral => "neutral",
            Mood::Sad => "sad",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Growth stages in order, from a fresh sprout to a fully grown tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// 🌱
    Seedling,
    /// 🌿
    Sprout,
    /// 🌳
    Sapling,
    /// 🎄
    Evergreen,
    /// 🎋
    Bamboo,
}

impl Stage {
    /// All stages, lowest health first.
    pub const ALL: [Stage; 5] = [
        Stage::Seedling,
        Stage::Sprout,
        Stage::Sapling,
        Stage::Evergreen,
        Stage::Bamboo,
    ];

    /// The emoji drawn for this stage.
    pub fn symbol(self) -> &'static str {
        match self {
            Stage::Seedling => "🌱",
            Stage::Sprout => "🌿",
            Stage::Sapling => "🌳",
            Stage::Evergreen => "🎄",
            Stage::Bamboo => "🎋",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Map health onto a mood. Boundaries 66 and 33 belong to the lower mood.
pub fn mood_for(health: Health) -> Mood {
    match health.value() {
        h if h > 66 => Mood::Happy,
        h if h > 33 => Mood::Neutral,
        _ => Mood::Sad,
    }
}

/// Map health onto a growth stage: `floor(health / 100 * 4)` indexes [`Stage::ALL`].
pub fn stage_for(health: Health) -> Stage {
    let last = Stage::ALL.len() - 1;
    let index = usize::from(health.value()) * last / usize::from(Health::MAX);
    Stage::ALL[index.min(last)]
}
