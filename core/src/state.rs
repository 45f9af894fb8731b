use serde::{Deserialize, Serialize};

use crate::geometry::Point2;

/// Face value of a card, `0..deck_size`.
pub type Card = u32;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub position: Point2,
    pub cards: Vec<Card>,
    #[serde(default)]
    pub hidden: bool,
}

impl Player {
    pub fn new(name: String, position: Point2) -> Self {
        Self {
            name,
            position,
            cards: Vec::new(),
            hidden: false,
        }
    }
}

/// Raw trail of the last shuffle drag.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CardPile {
    pub positions: Vec<Point2>,
}

impl CardPile {
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drawn_card: Option<Card>,
    pub players: Vec<Player>,
    pub card_pile: CardPile,
}

impl Game {
    pub fn player(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    pub fn default_player_name(&self) -> String {
        format!("Player {}", self.players.len() + 1)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Root {
    pub game: Game,
}
