use serde::{Deserialize, Serialize};

use crate::geometry::Point2;
use crate::patch::Patch;
use crate::state::{Card, Game, Player};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    SetName(String),
    ClearCards,
    /// One-way; there is no unhide.
    Hide,
    Move(Point2),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameAction {
    AddPlayer {
        position: Point2,
        name: Option<String>,
    },
    RestartPile(Point2),
    PushPile(Point2),
    DrawCard(Card),
    DiscardDrawnCard,
    GiveCard {
        player: usize,
    },
    Player {
        index: usize,
        action: PlayerAction,
    },
}

impl GameAction {
    /// Plans the patches this action makes against `game`.
    ///
    /// An empty plan means the action is a no-op in the current state. A
    /// non-empty plan always applies cleanly to the `game` it was planned on.
    pub fn plan(&self, game: &Game) -> Vec<Patch> {
        match self {
            GameAction::AddPlayer { position, name } => {
                let name = name
                    .clone()
                    .unwrap_or_else(|| game.default_player_name());
                vec![Patch::PushPlayer(Player::new(name, *position))]
            }
            GameAction::RestartPile(point) => {
                if game.card_pile.positions == [*point] {
                    return Vec::new();
                }
                vec![Patch::SetPilePositions(vec![*point])]
            }
            GameAction::PushPile(point) => vec![Patch::PushPilePosition(*point)],
            GameAction::DrawCard(card) => {
                if game.drawn_card.is_some() {
                    return Vec::new();
                }
                vec![Patch::SetDrawnCard(Some(*card))]
            }
            GameAction::DiscardDrawnCard => {
                if game.drawn_card.is_none() {
                    return Vec::new();
                }
                vec![Patch::SetDrawnCard(None)]
            }
            GameAction::GiveCard { player } => {
                let Some(card) = game.drawn_card else {
                    return Vec::new();
                };
                if *player >= game.players.len() {
                    return Vec::new();
                }
                vec![
                    Patch::PushPlayerCard {
                        index: *player,
                        card,
                    },
                    Patch::SetDrawnCard(None),
                ]
            }
            GameAction::Player { index, action } => {
                let Some(player) = game.player(*index) else {
                    return Vec::new();
                };
                plan_player_action(*index, player, action)
            }
        }
    }
}

fn plan_player_action(index: usize, player: &Player, action: &PlayerAction) -> Vec<Patch> {
    match action {
        PlayerAction::SetName(name) => {
            if player.name == *name {
                return Vec::new();
            }
            vec![Patch::SetPlayerName {
                index,
                name: name.clone(),
            }]
        }
        PlayerAction::ClearCards => {
            if player.cards.is_empty() {
                return Vec::new();
            }
            vec![Patch::SetPlayerCards {
                index,
                cards: Vec::new(),
            }]
        }
        PlayerAction::Hide => {
            if player.hidden {
                return Vec::new();
            }
            vec![Patch::SetPlayerHidden {
                index,
                hidden: true,
            }]
        }
        PlayerAction::Move(position) => {
            if player.position == *position {
                return Vec::new();
            }
            vec![Patch::SetPlayerPosition {
                index,
                position: *position,
            }]
        }
    }
}
