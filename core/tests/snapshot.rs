use cardtable_core::{
    decode_root, encode, GameAction, GameStore, Point2, Root, SnapshotError, TableRules,
};

#[test]
fn snapshot_shape_matches_storage_format() {
    let mut store = GameStore::new(Root::default());
    store.dispatch(&GameAction::AddPlayer {
        position: Point2::new(1.0, 2.0),
        name: None,
    });
    store.dispatch(&GameAction::RestartPile(Point2::new(3.0, 4.0)));
    let raw = encode(store.root()).expect("encode");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
    assert!(value["game"].get("drawnCard").is_none());
    assert_eq!(value["game"]["players"][0]["name"], "Player 1");
    assert_eq!(value["game"]["players"][0]["hidden"], false);
    assert_eq!(
        value["game"]["cardPile"]["positions"],
        serde_json::json!([[3.0, 4.0]])
    );
}

#[test]
fn snapshot_restores_saved_root() {
    let mut store = GameStore::new(Root::default());
    store.dispatch(&GameAction::AddPlayer {
        position: Point2::new(1.0, 2.0),
        name: Some("Ada".to_string()),
    });
    store.dispatch(&GameAction::DrawCard(51));
    let raw = encode(store.root()).expect("encode");
    let restored = decode_root(&raw, &TableRules::default()).expect("decode");
    assert_eq!(&restored, store.root());
}

#[test]
fn hidden_defaults_to_false() {
    let raw = r#"{"game":{"players":[{"name":"A","position":[0,0],"cards":[1]}],"cardPile":{"positions":[]}}}"#;
    let root = decode_root(raw, &TableRules::default()).expect("decode");
    assert!(!root.game.players[0].hidden);
    assert_eq!(root.game.drawn_card, None);
}

#[test]
fn malformed_snapshot_is_rejected() {
    let rules = TableRules::default();
    let wrong_arity = r#"{"game":{"players":[],"cardPile":{"positions":[[1,2,3]]}}}"#;
    assert!(matches!(
        decode_root(wrong_arity, &rules),
        Err(SnapshotError::Decode(_))
    ));
    let missing_pile = r#"{"game":{"players":[]}}"#;
    assert!(decode_root(missing_pile, &rules).is_err());
    assert!(decode_root("not json", &rules).is_err());
}

#[test]
fn card_outside_deck_is_rejected() {
    let raw = r#"{"game":{"drawnCard":60,"players":[],"cardPile":{"positions":[]}}}"#;
    assert!(matches!(
        decode_root(raw, &TableRules::default()),
        Err(SnapshotError::CardOutOfDeck { card: 60, .. })
    ));
}
