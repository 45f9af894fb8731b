use serde::{Deserialize, Serialize};

use crate::geometry::Point2;
use crate::state::{Card, Game, Player};

/// One structural change to a [`Game`].
///
/// Applying a patch yields the patch that reverts it, so every forward change
/// carries its inverse without a separate diffing step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Patch {
    SetDrawnCard(Option<Card>),
    PushPlayer(Player),
    PopPlayer,
    SetPlayerName { index: usize, name: String },
    SetPlayerPosition { index: usize, position: Point2 },
    SetPlayerCards { index: usize, cards: Vec<Card> },
    PushPlayerCard { index: usize, card: Card },
    PopPlayerCard { index: usize },
    SetPlayerHidden { index: usize, hidden: bool },
    SetPilePositions(Vec<Point2>),
    PushPilePosition(Point2),
    PopPilePosition,
}

impl Patch {
    /// Applies the patch and returns its inverse, or `None` when the patch
    /// does not fit the current game (the game is left untouched).
    pub fn apply(&self, game: &mut Game) -> Option<Patch> {
        match self {
            Patch::SetDrawnCard(card) => {
                let previous = std::mem::replace(&mut game.drawn_card, *card);
                Some(Patch::SetDrawnCard(previous))
            }
            Patch::PushPlayer(player) => {
                game.players.push(player.clone());
                Some(Patch::PopPlayer)
            }
            Patch::PopPlayer => game.players.pop().map(Patch::PushPlayer),
            Patch::SetPlayerName { index, name } => {
                let player = game.players.get_mut(*index)?;
                let previous = std::mem::replace(&mut player.name, name.clone());
                Some(Patch::SetPlayerName {
                    index: *index,
                    name: previous,
                })
            }
            Patch::SetPlayerPosition { index, position } => {
                let player = game.players.get_mut(*index)?;
                let previous = std::mem::replace(&mut player.position, *position);
                Some(Patch::SetPlayerPosition {
                    index: *index,
                    position: previous,
                })
            }
            Patch::SetPlayerCards { index, cards } => {
                let player = game.players.get_mut(*index)?;
                let previous = std::mem::replace(&mut player.cards, cards.clone());
                Some(Patch::SetPlayerCards {
                    index: *index,
                    cards: previous,
                })
            }
            Patch::PushPlayerCard { index, card } => {
                let player = game.players.get_mut(*index)?;
                player.cards.push(*card);
                Some(Patch::PopPlayerCard { index: *index })
            }
            Patch::PopPlayerCard { index } => {
                let player = game.players.get_mut(*index)?;
                let card = player.cards.pop()?;
                Some(Patch::PushPlayerCard {
                    index: *index,
                    card,
                })
            }
            Patch::SetPlayerHidden { index, hidden } => {
                let player = game.players.get_mut(*index)?;
                let previous = std::mem::replace(&mut player.hidden, *hidden);
                Some(Patch::SetPlayerHidden {
                    index: *index,
                    hidden: previous,
                })
            }
            Patch::SetPilePositions(positions) => {
                let previous =
                    std::mem::replace(&mut game.card_pile.positions, positions.clone());
                Some(Patch::SetPilePositions(previous))
            }
            Patch::PushPilePosition(point) => {
                game.card_pile.positions.push(*point);
                Some(Patch::PopPilePosition)
            }
            Patch::PopPilePosition => game.card_pile.positions.pop().map(Patch::PushPilePosition),
        }
    }
}

/// A forward change together with the patches that revert it.
///
/// `inverse` is already in application order: applying it front to back
/// undoes `forward`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Change {
    pub forward: Vec<Patch>,
    pub inverse: Vec<Patch>,
}

/// Applies `patches` as one unit. Either every patch lands and the reverting
/// patches are returned, or the game is rolled back and `None` is returned.
pub fn apply_patches(game: &mut Game, patches: &[Patch]) -> Option<Vec<Patch>> {
    let mut inverse = Vec::with_capacity(patches.len());
    for patch in patches {
        match patch.apply(game) {
            Some(undo) => inverse.push(undo),
            None => {
                for undo in inverse.iter().rev() {
                    let _ = undo.apply(game);
                }
                return None;
            }
        }
    }
    inverse.reverse();
    Some(inverse)
}
