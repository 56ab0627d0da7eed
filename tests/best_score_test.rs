//! Integration tests for best-score persistence across scene instances.

use flappy_scene::engine::ArcadeEngine;
use flappy_scene::scene::{Collision, PlayScene, ScenePhase, TextSlot};
use flappy_scene::score::{BestScoreStore, JsonBestScoreStore};
use flappy_scene::ValidatedConfig;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// One full session: score `passes` pipes, then crash. Returns the best
/// score shown when the session started.
fn play_session(path: &Path, passes: u32, seed: u64) -> String {
    let config = ValidatedConfig::default();
    let engine = ArcadeEngine::new(&config);
    let store = JsonBestScoreStore::new(path);
    let mut scene = PlayScene::new(config, engine, store, ChaCha8Rng::seed_from_u64(seed));
    let shown = scene.engine().text(TextSlot::BestScore).to_string();

    let width = scene.pool().pipe_width();
    for _ in 0..passes {
        scene.pool_mut().get_mut(0).unwrap().x = -width - 1.0;
        scene.frame(Duration::ZERO);
    }
    assert_eq!(scene.score(), passes);

    scene.on_collision(Collision { slot: 1 });
    assert_eq!(scene.phase(), ScenePhase::GameOver);
    shown
}

#[test]
fn test_best_score_survives_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("best_score.json");

    assert_eq!(play_session(&path, 5, 1), "Best score: 0");
    assert_eq!(play_session(&path, 2, 2), "Best score: 5");
    assert_eq!(play_session(&path, 9, 3), "Best score: 5");
    assert_eq!(play_session(&path, 0, 4), "Best score: 9");

    let store = JsonBestScoreStore::new(&path);
    assert_eq!(store.load_best().unwrap(), Some(9));
}

#[test]
fn test_best_score_never_decreases() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("best_score.json");
    let mut running_max = 0u32;

    for (seed, passes) in [3u32, 7, 2, 7, 1, 11, 0].into_iter().enumerate() {
        play_session(&path, passes, seed as u64);
        running_max = running_max.max(passes);
        let stored = JsonBestScoreStore::new(&path).load_best().unwrap();
        assert_eq!(stored, Some(running_max));
    }
}

#[test]
fn test_unwritable_storage_degrades_gracefully() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();
    let path = blocker.join("best_score.json");

    assert_eq!(play_session(&path, 4, 1), "Best score: 0");
    assert!(!path.exists());
}
