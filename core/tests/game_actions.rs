use cardtable_core::{GameAction, GameStore, PlayerAction, Point2, Root};

fn store_with_players(count: usize) -> GameStore {
    let mut store = GameStore::new(Root::default());
    for index in 0..count {
        store.dispatch(&GameAction::AddPlayer {
            position: Point2::new(index as f32 * 100.0, 0.0),
            name: None,
        });
    }
    store
}

#[test]
fn add_player_uses_running_default_name() {
    let mut store = store_with_players(2);
    store.dispatch(&GameAction::Player {
        index: 0,
        action: PlayerAction::Hide,
    });
    store.dispatch(&GameAction::AddPlayer {
        position: Point2::new(1.0, 2.0),
        name: None,
    });
    store.dispatch(&GameAction::AddPlayer {
        position: Point2::new(3.0, 4.0),
        name: Some("Dealer".to_string()),
    });
    let names: Vec<&str> = store
        .game()
        .players
        .iter()
        .map(|player| player.name.as_str())
        .collect();
    assert_eq!(names, vec!["Player 1", "Player 2", "Player 3", "Dealer"]);
    assert_eq!(store.game().players[2].position, Point2::new(1.0, 2.0));
}

#[test]
fn draw_card_does_not_overwrite_pending_card() {
    let mut store = store_with_players(1);
    assert!(store.dispatch(&GameAction::DrawCard(7)).is_some());
    assert!(store.dispatch(&GameAction::DrawCard(9)).is_none());
    assert_eq!(store.game().drawn_card, Some(7));
}

#[test]
fn give_card_appends_and_clears_pending() {
    let mut store = store_with_players(2);
    store.dispatch(&GameAction::DrawCard(11));
    assert!(store.dispatch(&GameAction::GiveCard { player: 1 }).is_some());
    assert_eq!(store.game().players[1].cards, vec![11]);
    assert_eq!(store.game().drawn_card, None);

    assert!(store.dispatch(&GameAction::GiveCard { player: 1 }).is_none());
    assert_eq!(store.game().players[1].cards, vec![11]);
}

#[test]
fn give_card_to_missing_player_keeps_pending_card() {
    let mut store = store_with_players(1);
    store.dispatch(&GameAction::DrawCard(3));
    assert!(store.dispatch(&GameAction::GiveCard { player: 5 }).is_none());
    assert_eq!(store.game().drawn_card, Some(3));
    assert!(store.game().players[0].cards.is_empty());
}

#[test]
fn same_card_can_be_drawn_twice() {
    let mut store = store_with_players(1);
    for _ in 0..2 {
        store.dispatch(&GameAction::DrawCard(4));
        store.dispatch(&GameAction::GiveCard { player: 0 });
    }
    assert_eq!(store.game().players[0].cards, vec![4, 4]);
}

#[test]
fn discard_clears_pending_card() {
    let mut store = store_with_players(1);
    store.dispatch(&GameAction::DrawCard(5));
    store.dispatch(&GameAction::DiscardDrawnCard);
    assert_eq!(store.game().drawn_card, None);
    assert!(store.dispatch(&GameAction::DiscardDrawnCard).is_none());
}

#[test]
fn restart_pile_replaces_trail() {
    let mut store = store_with_players(0);
    store.dispatch(&GameAction::RestartPile(Point2::new(1.0, 1.0)));
    store.dispatch(&GameAction::PushPile(Point2::new(2.0, 2.0)));
    store.dispatch(&GameAction::PushPile(Point2::new(3.0, 3.0)));
    assert_eq!(store.game().card_pile.positions.len(), 3);

    let start = Point2::new(9.0, 9.0);
    store.dispatch(&GameAction::RestartPile(start));
    assert_eq!(store.game().card_pile.positions, vec![start]);
}

#[test]
fn hide_is_index_stable_and_still_receives_cards() {
    let mut store = store_with_players(3);
    let third = store.game().players[2].clone();
    store.dispatch(&GameAction::Player {
        index: 1,
        action: PlayerAction::Hide,
    });
    assert_eq!(store.game().players.len(), 3);
    assert!(store.game().players[1].hidden);
    assert_eq!(store.game().players[2], third);

    store.dispatch(&GameAction::DrawCard(20));
    assert!(store.dispatch(&GameAction::GiveCard { player: 1 }).is_some());
    assert_eq!(store.game().players[1].cards, vec![20]);
}

#[test]
fn player_actions_scope_to_one_player() {
    let mut store = store_with_players(2);
    store.dispatch(&GameAction::DrawCard(1));
    store.dispatch(&GameAction::GiveCard { player: 0 });
    store.dispatch(&GameAction::Player {
        index: 0,
        action: PlayerAction::SetName("Ada".to_string()),
    });
    store.dispatch(&GameAction::Player {
        index: 0,
        action: PlayerAction::Move(Point2::new(40.0, 50.0)),
    });
    store.dispatch(&GameAction::Player {
        index: 0,
        action: PlayerAction::ClearCards,
    });
    let ada = &store.game().players[0];
    assert_eq!(ada.name, "Ada");
    assert_eq!(ada.position, Point2::new(40.0, 50.0));
    assert!(ada.cards.is_empty());
    assert_eq!(store.game().players[1].name, "Player 2");

    assert!(store
        .dispatch(&GameAction::Player {
            index: 9,
            action: PlayerAction::Hide,
        })
        .is_none());
}
