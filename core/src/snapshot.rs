use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::{Card, Root};

pub const SESSION_KEY: &str = "cardtable.session.v1";

pub const DECK_SIZE_DEFAULT: u32 = 52;
pub const PILE_MIN_DISTANCE_DEFAULT: f32 = 20.0;
pub const HISTORY_LIMIT_DEFAULT: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableRules {
    pub deck_size: u32,
    pub pile_min_distance: f32,
    /// Undo entries kept before the oldest are dropped.
    pub history_limit: usize,
}

impl Default for TableRules {
    fn default() -> Self {
        Self {
            deck_size: DECK_SIZE_DEFAULT,
            pile_min_distance: PILE_MIN_DISTANCE_DEFAULT,
            history_limit: HISTORY_LIMIT_DEFAULT,
        }
    }
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("malformed snapshot: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("non-finite coordinate in {field}")]
    NonFinitePoint { field: &'static str },
    #[error("card {card} outside a deck of {deck_size}")]
    CardOutOfDeck { card: Card, deck_size: u32 },
}

pub fn validate_root(root: &Root, rules: &TableRules) -> Result<(), SnapshotError> {
    let game = &root.game;
    let in_deck = |card: Card| -> Result<(), SnapshotError> {
        if card >= rules.deck_size {
            return Err(SnapshotError::CardOutOfDeck {
                card,
                deck_size: rules.deck_size,
            });
        }
        Ok(())
    };
    if let Some(card) = game.drawn_card {
        in_deck(card)?;
    }
    for player in &game.players {
        if !player.position.is_finite() {
            return Err(SnapshotError::NonFinitePoint {
                field: "player position",
            });
        }
        for card in &player.cards {
            in_deck(*card)?;
        }
    }
    if game
        .card_pile
        .positions
        .iter()
        .any(|point| !point.is_finite())
    {
        return Err(SnapshotError::NonFinitePoint {
            field: "card pile",
        });
    }
    Ok(())
}
