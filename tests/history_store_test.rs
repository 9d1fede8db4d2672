// tests/history_store_test.rs

use std::sync::Arc;

use gemini_relay::history::{migration::run_migrations, HistoryStore, SqliteHistoryStore};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

// One connection keeps every handle on the same in-memory database.
async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    run_migrations(&pool).await.expect("Migrations failed");
    pool
}

#[tokio::test]
async fn test_recent_on_empty_history_is_empty() {
    let store = SqliteHistoryStore::new(memory_pool().await);
    let exchanges = store.recent("alice", "s1", 5).await.unwrap();
    assert!(exchanges.is_empty());
}

#[tokio::test]
async fn test_append_assigns_monotonic_ids() {
    let store = SqliteHistoryStore::new(memory_pool().await);

    let first = store.append("alice", "s1", "q1", "r1").await.unwrap();
    let second = store.append("alice", "s1", "q2", "r2").await.unwrap();

    assert!(second.id > first.id);
    assert_eq!(first.user_id, "alice");
    assert_eq!(first.query, "q1");
    assert_eq!(first.response, "r1");
    // Second-precision "YYYY-MM-DD HH:MM:SS"
    assert_eq!(first.timestamp.len(), 19);
}

#[tokio::test]
async fn test_recent_returns_last_n_oldest_first() {
    let store = SqliteHistoryStore::new(memory_pool().await);

    for i in 1..=7 {
        store
            .append("alice", "s1", &format!("q{}", i), &format!("r{}", i))
            .await
            .unwrap();
    }

    let exchanges = store.recent("alice", "s1", 5).await.unwrap();
    assert_eq!(exchanges.len(), 5);

    // The two oldest records fall off; the rest come back in write order.
    let queries: Vec<&str> = exchanges.iter().map(|e| e.query.as_str()).collect();
    assert_eq!(queries, vec!["q3", "q4", "q5", "q6", "q7"]);
}

#[tokio::test]
async fn test_recent_with_fewer_records_than_limit() {
    let store = SqliteHistoryStore::new(memory_pool().await);

    store.append("alice", "s1", "q1", "r1").await.unwrap();
    store.append("alice", "s1", "q2", "r2").await.unwrap();

    let exchanges = store.recent("alice", "s1", 5).await.unwrap();
    assert_eq!(exchanges.len(), 2);
    assert_eq!(exchanges[0].query, "q1");
    assert_eq!(exchanges[1].query, "q2");
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let store = SqliteHistoryStore::new(memory_pool().await);

    store.append("alice", "s1", "alice-q", "alice-r").await.unwrap();
    store.append("bob", "s1", "bob-q", "bob-r").await.unwrap();
    store.append("alice", "s2", "other-q", "other-r").await.unwrap();

    let exchanges = store.recent("alice", "s1", 5).await.unwrap();
    assert_eq!(exchanges.len(), 1);
    assert_eq!(exchanges[0].query, "alice-q");
}

#[tokio::test]
async fn test_concurrent_appends_never_cross_sessions() {
    let store = Arc::new(SqliteHistoryStore::new(memory_pool().await));

    let mut handles = Vec::new();
    for i in 0..10 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            let session = if i % 2 == 0 { "even" } else { "odd" };
            store
                .append("alice", session, &format!("q{}", i), &format!("r{}", i))
                .await
                .unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let even = store.recent("alice", "even", 10).await.unwrap();
    let odd = store.recent("alice", "odd", 10).await.unwrap();

    assert_eq!(even.len(), 5);
    assert_eq!(odd.len(), 5);
    assert!(even
        .iter()
        .all(|e| e.query.trim_start_matches('q').parse::<u32>().unwrap() % 2 == 0));
    assert!(odd
        .iter()
        .all(|e| e.query.trim_start_matches('q').parse::<u32>().unwrap() % 2 == 1));
}

#[tokio::test]
async fn test_store_survives_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("history.db");
    let url = format!("sqlite:{}?mode=rwc", db_path.display());

    {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(&url)
            .await
            .unwrap();
        run_migrations(&pool).await.unwrap();
        let store = SqliteHistoryStore::new(pool);
        store.append("alice", "s1", "q1", "r1").await.unwrap();
    }

    // Reopen and read back.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&url)
        .await
        .unwrap();
    run_migrations(&pool).await.unwrap();
    let store = SqliteHistoryStore::new(pool);
    let exchanges = store.recent("alice", "s1", 5).await.unwrap();
    assert_eq!(exchanges.len(), 1);
    assert_eq!(exchanges[0].response, "r1");
}
