#![cfg(target_arch = "wasm32")]

use groupgame_core::*;
use wasm_bindgen_test::*;

fn categories() -> Categories {
    Categories::from_iter([
        ("Birds", vec!["owl", "wren", "crow"]),
        ("Trees", vec!["oak", "ash", "elm"]),
        ("Metals", vec!["iron", "tin", "gold"]),
    ])
}

#[wasm_bindgen_test]
fn seeded_deal_is_reproducible() {
    let config = GameConfig::square(3).unwrap();

    let first = RandomWordlistGenerator::new(42)
        .generate(&categories(), config)
        .unwrap();
    let second = RandomWordlistGenerator::new(42)
        .generate(&categories(), config)
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), 9);
}

#[wasm_bindgen_test]
fn saved_game_survives_a_restart() {
    let config = GameConfig::square(3).unwrap();
    let (mut engine, _) = GameEngine::start(&categories(), config, MemoryStore::new(), 3).unwrap();
    let held = engine.board().tiles().next().unwrap().origin();
    engine.select(held);
    engine.save_state();

    let (resumed, outcome) =
        GameEngine::start(&categories(), config, engine.store().clone(), 4).unwrap();

    assert_eq!(outcome, StartOutcome::Restored);
    assert_eq!(resumed.board(), engine.board());
}
