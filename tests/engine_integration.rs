//! End-to-end tests driving the engine through its managers over the
//! in-memory store.

use std::sync::Arc;

use tournament_engine::EngineError;
use tournament_engine::db::MemoryStore;
use tournament_engine::games::{GameManager, Platform};
use tournament_engine::matches::{MatchManager, MatchResult};
use tournament_engine::tournament::{EnrollmentManager, LeaderboardProjector, TournamentManager};
use tournament_engine::users::{UserManager, UserRole};

struct Engine {
    store: Arc<MemoryStore>,
    users: UserManager,
    games: GameManager,
    tournaments: TournamentManager,
    enrollment: EnrollmentManager,
    matches: MatchManager,
    leaderboard: LeaderboardProjector,
}

fn engine() -> Engine {
    let store = Arc::new(MemoryStore::new());
    Engine {
        users: UserManager::new(store.clone()),
        games: GameManager::new(store.clone()),
        tournaments: TournamentManager::new(store.clone(), store.clone(), store.clone()),
        enrollment: EnrollmentManager::new(store.clone(), store.clone(), store.clone()),
        matches: MatchManager::new(store.clone(), store.clone(), store.clone(), store.clone()),
        leaderboard: LeaderboardProjector::new(store.clone(), store.clone()),
        store,
    }
}

async fn occupancy(engine: &Engine, name: &str) -> i32 {
    use tournament_engine::db::TournamentRepository;
    engine
        .store
        .find_by_name(name)
        .await
        .unwrap()
        .unwrap()
        .current_players
}

#[tokio::test]
async fn test_full_tournament_lifecycle() {
    let engine = engine();

    engine
        .games
        .create_game("Quake Arena", "fps", Platform::Pc)
        .await
        .unwrap();
    engine
        .users
        .create_user("org", UserRole::Organizer, None)
        .await
        .unwrap();
    let alice = engine
        .users
        .create_user("alice", UserRole::Player, None)
        .await
        .unwrap();
    let bob = engine
        .users
        .create_user("bob", UserRole::Player, Some(20))
        .await
        .unwrap();

    engine
        .tournaments
        .create_tournament("Spring Open", 8, "Quake Arena", "org")
        .await
        .unwrap();

    let alice_entry = engine
        .enrollment
        .enroll("Spring Open", "alice", None)
        .await
        .unwrap();
    let bob_entry = engine
        .enrollment
        .enroll("Spring Open", "bob", None)
        .await
        .unwrap();
    assert_eq!(occupancy(&engine, "Spring Open").await, 2);

    let m = engine
        .matches
        .create_match("Spring Open", 1, "alice", "bob", None)
        .await
        .unwrap();
    engine
        .matches
        .update_match_result(m.public_id, MatchResult::Player1Win)
        .await
        .unwrap();

    // Winner gains 10, loser drops 5.
    assert_eq!(engine.users.get_user(alice.public_id).await.unwrap().ranking, 10);
    assert_eq!(engine.users.get_user(bob.public_id).await.unwrap().ranking, 15);

    engine
        .enrollment
        .update_score(alice_entry.public_id, 120)
        .await
        .unwrap();
    engine
        .enrollment
        .update_score(bob_entry.public_id, 80)
        .await
        .unwrap();

    let standings = engine.leaderboard.standings("Spring Open").await.unwrap();
    assert_eq!(standings.len(), 2);
    assert_eq!(standings[0].player_id, alice.public_id);
    assert_eq!(standings[1].player_id, bob.public_id);

    engine
        .enrollment
        .withdraw(bob_entry.public_id)
        .await
        .unwrap();
    assert_eq!(occupancy(&engine, "Spring Open").await, 1);

    let tournament = engine
        .tournaments
        .get_tournament_by_name("Spring Open")
        .await
        .unwrap();
    engine
        .tournaments
        .delete_tournament(tournament.public_id)
        .await
        .unwrap();
    let err = engine.leaderboard.standings("Spring Open").await.unwrap_err();
    assert!(matches!(err, EngineError::NotFound { .. }));
}

#[tokio::test]
async fn test_leaderboard_ties_keep_enrollment_order() {
    let engine = engine();

    engine
        .games
        .create_game("Chess", "strategy", Platform::Web)
        .await
        .unwrap();
    engine
        .users
        .create_user("org", UserRole::Organizer, None)
        .await
        .unwrap();
    for name in ["alice", "bob", "carol"] {
        engine
            .users
            .create_user(name, UserRole::Player, None)
            .await
            .unwrap();
    }
    engine
        .tournaments
        .create_tournament("Club Night", 8, "Chess", "org")
        .await
        .unwrap();

    let alice = engine
        .enrollment
        .enroll("Club Night", "alice", Some(50))
        .await
        .unwrap();
    let bob = engine
        .enrollment
        .enroll("Club Night", "bob", Some(90))
        .await
        .unwrap();
    let carol = engine
        .enrollment
        .enroll("Club Night", "carol", Some(50))
        .await
        .unwrap();

    let standings = engine.leaderboard.standings("Club Night").await.unwrap();
    let order: Vec<_> = standings.iter().map(|p| p.public_id).collect();
    // alice enrolled before carol, so she stays ahead on the shared 50.
    assert_eq!(order, vec![bob.public_id, alice.public_id, carol.public_id]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_enrollment_never_overfills() {
    let engine = engine();

    engine
        .games
        .create_game("Tetris", "puzzle", Platform::Console)
        .await
        .unwrap();
    engine
        .users
        .create_user("org", UserRole::Organizer, None)
        .await
        .unwrap();
    for i in 0..12 {
        engine
            .users
            .create_user(&format!("player{i}"), UserRole::Player, None)
            .await
            .unwrap();
    }
    engine
        .tournaments
        .create_tournament("Blitz", 3, "Tetris", "org")
        .await
        .unwrap();

    let mut handles = Vec::new();
    for i in 0..12 {
        let enrollment = engine.enrollment.clone();
        handles.push(tokio::spawn(async move {
            enrollment.enroll("Blitz", &format!("player{i}"), None).await
        }));
    }

    let mut admitted = 0;
    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => admitted += 1,
            Err(EngineError::CapacityExceeded { .. }) => rejected += 1,
            Err(other) => panic!("unexpected enrollment error: {other:?}"),
        }
    }

    assert_eq!(admitted, 3);
    assert_eq!(rejected, 9);
    assert_eq!(occupancy(&engine, "Blitz").await, 3);

    let standings = engine.leaderboard.standings("Blitz").await.unwrap();
    assert_eq!(standings.len(), 3);
}

#[tokio::test]
async fn test_rankings_survive_tournament_deletion() {
    let engine = engine();

    engine
        .games
        .create_game("Go", "strategy", Platform::Web)
        .await
        .unwrap();
    engine
        .users
        .create_user("org", UserRole::Organizer, None)
        .await
        .unwrap();
    let alice = engine
        .users
        .create_user("alice", UserRole::Player, None)
        .await
        .unwrap();
    engine
        .users
        .create_user("bob", UserRole::Player, None)
        .await
        .unwrap();
    engine
        .tournaments
        .create_tournament("Masters", 4, "Go", "org")
        .await
        .unwrap();
    engine.enrollment.enroll("Masters", "alice", None).await.unwrap();
    engine.enrollment.enroll("Masters", "bob", None).await.unwrap();

    let m = engine
        .matches
        .create_match("Masters", 1, "alice", "bob", None)
        .await
        .unwrap();
    engine
        .matches
        .update_match_result(m.public_id, MatchResult::Player1Win)
        .await
        .unwrap();

    let masters = engine
        .tournaments
        .get_tournament_by_name("Masters")
        .await
        .unwrap();
    engine
        .tournaments
        .delete_tournament(masters.public_id)
        .await
        .unwrap();

    // The cascade removes matches and participations; earned rankings are
    // user state and stay.
    let err = engine.matches.get_match(m.public_id).await.unwrap_err();
    assert!(matches!(err, EngineError::NotFound { .. }));
    assert_eq!(engine.users.get_user(alice.public_id).await.unwrap().ranking, 10);
}
