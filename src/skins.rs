//! Cosmetic caterpillar skins
//!
//! A skin unlocks once the player's best score reaches its price. Where the
//! best score is stored is up to the persistence layer.

use serde::{Deserialize, Serialize};

/// A purchasable colour scheme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skin {
    pub name: String,
    /// Body colour (CSS hex)
    pub color: String,
    /// High score required to unlock
    pub price: u64,
}

impl Skin {
    pub fn new(name: &str, color: &str, price: u64) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
            price,
        }
    }

    pub fn is_unlocked(&self, high_score: u64) -> bool {
        high_score >= self.price
    }
}

/// Classic, Red, Blue, Purple, Gold
pub fn default_skins() -> Vec<Skin> {
    vec![
        Skin::new("Classic", "#4CAF50", 0),
        Skin::new("Red", "#F44336", 50),
        Skin::new("Blue", "#2196F3", 100),
        Skin::new("Purple", "#9C27B0", 200),
        Skin::new("Gold", "#FFD700", 500),
    ]
}

/// Indices of every skin the given best score unlocks
pub fn unlocked_indices(skins: &[Skin], high_score: u64) -> Vec<usize> {
    skins
        .iter()
        .enumerate()
        .filter(|(_, skin)| skin.is_unlocked(high_score))
        .map(|(i, _)| i)
        .collect()
}
