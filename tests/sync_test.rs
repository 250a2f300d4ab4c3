use serde_json::{json, Value};
use sqlx::sqlite::SqlitePool;
use std::sync::Arc;
use tokio::net::TcpListener;

use golf_shot_db::config::{ConfigType, SyncConfig};
use golf_shot_db::db::Database;
use golf_shot_db::records::{Club, RoundRecord, ShotRecord, ShotType};
use golf_shot_db::serve::{router, AppState};
use golf_shot_db::sync::{sync_rounds, SyncSummary};

/// Start the API server over a fresh database file
async fn start_test_server(database_url: &str) -> (String, tokio::task::JoinHandle<()>) {
    let db = Database::connect(database_url).await.unwrap();
    db.init_schema().await.unwrap();

    let app = router(Arc::new(AppState { db }));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let url = format!("http://{}", addr);

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give server time to start
    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

    (url, handle)
}

fn db_url(temp_dir: &tempfile::TempDir, name: &str) -> String {
    format!("sqlite://{}", temp_dir.path().join(name).display())
}

/// Seed a round with shots on hole 1 and scored holes through the API
async fn seed_round(
    client: &reqwest::Client,
    base: &str,
    round_id: i64,
    course: &str,
    date: &str,
    shots: i32,
    holes: i32,
) {
    let resp: Value = client
        .post(format!("{}/api/round", base))
        .json(&json!({ "round_id": round_id, "course_name": course, "date": date }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(resp["success"], json!(true));

    for shot_number in 1..=shots {
        let resp: Value = client
            .post(format!("{}/api/shot", base))
            .json(&json!({
                "round_id": round_id,
                "hole": 1,
                "shot_number": shot_number,
                "club": "Driver",
                "shot_type": "Tee",
                "latitude": 36.57,
                "longitude": -121.94,
                "timestamp": date,
            }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(resp["success"], json!(true));
    }

    for hole in 1..=holes {
        let resp: Value = client
            .post(format!("{}/api/hole", base))
            .json(&json!({ "round_id": round_id, "hole": hole, "score": 4 }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(resp["success"], json!(true));
    }
}

/// Run the blocking sync client off the test runtime
async fn run_sync(remote_url: &str, database_url: &str) -> Result<SyncSummary, String> {
    let config = SyncConfig {
        config_type: ConfigType::Sync,
        remote_url: remote_url.to_string(),
        database_url: database_url.to_string(),
    };
    tokio::task::spawn_blocking(move || sync_rounds(&config).map_err(|e| e.to_string()))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_sync_imports_rounds_and_marks_remote() {
    let temp_dir = tempfile::tempdir().unwrap();
    let remote_db_url = db_url(&temp_dir, "remote.db");
    let local_db_url = db_url(&temp_dir, "local.db");
    let (server_url, _handle) = start_test_server(&remote_db_url).await;
    let client = reqwest::Client::new();

    seed_round(&client, &server_url, 9001, "Riverbend", "2025-06-20T07:30:00Z", 2, 2).await;
    seed_round(&client, &server_url, 9002, "Dunes", "2025-07-04T09:00:00Z", 1, 0).await;

    let result = run_sync(&server_url, &local_db_url).await;
    assert!(result.is_ok(), "Sync failed: {:?}", result.err());
    let summary = result.unwrap();
    assert_eq!(summary.rounds_imported, 2);
    assert_eq!(summary.shots_imported, 3);
    assert_eq!(summary.holes_imported, 2);

    // Rows landed locally with their remote ids intact
    let local = SqlitePool::connect(&local_db_url).await.unwrap();
    let round_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rounds")
        .fetch_one(&local)
        .await
        .unwrap();
    assert_eq!(round_count, 2);

    let course: String = sqlx::query_scalar("SELECT course_name FROM rounds WHERE round_id = 9001")
        .fetch_one(&local)
        .await
        .unwrap();
    assert_eq!(course, "Riverbend");

    let shot_ids: Vec<i64> =
        sqlx::query_scalar("SELECT shot_id FROM shots WHERE round_id = 9001 ORDER BY shot_id")
            .fetch_all(&local)
            .await
            .unwrap();
    assert_eq!(shot_ids, vec![1, 2]);

    let shot_ids: Vec<i64> =
        sqlx::query_scalar("SELECT shot_id FROM shots WHERE round_id = 9002 ORDER BY shot_id")
            .fetch_all(&local)
            .await
            .unwrap();
    assert_eq!(shot_ids, vec![3]);

    let hole_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM holes")
        .fetch_one(&local)
        .await
        .unwrap();
    assert_eq!(hole_count, 2);

    // Remote flagged both rounds, so a fresh export is empty
    let remote = SqlitePool::connect(&remote_db_url).await.unwrap();
    let unsynced: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM rounds WHERE synced_to_local = FALSE")
            .fetch_one(&remote)
            .await
            .unwrap();
    assert_eq!(unsynced, 0);

    let export: Value = client
        .get(format!("{}/api/export/unsynced", server_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(export["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_second_sync_is_a_noop() {
    let temp_dir = tempfile::tempdir().unwrap();
    let remote_db_url = db_url(&temp_dir, "remote.db");
    let local_db_url = db_url(&temp_dir, "local.db");
    let (server_url, _handle) = start_test_server(&remote_db_url).await;
    let client = reqwest::Client::new();

    seed_round(&client, &server_url, 9101, "Cliffside", "2025-08-01T08:00:00Z", 1, 1).await;

    let summary = run_sync(&server_url, &local_db_url).await.unwrap();
    assert_eq!(summary.rounds_imported, 1);

    let summary = run_sync(&server_url, &local_db_url).await.unwrap();
    assert_eq!(summary, SyncSummary::default());

    let local = SqlitePool::connect(&local_db_url).await.unwrap();
    let round_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rounds")
        .fetch_one(&local)
        .await
        .unwrap();
    assert_eq!(round_count, 1);
}

#[tokio::test]
async fn test_sync_replaces_conflicting_local_round() {
    let temp_dir = tempfile::tempdir().unwrap();
    let remote_db_url = db_url(&temp_dir, "remote.db");
    let local_db_url = db_url(&temp_dir, "local.db");

    // Local database already holds an older copy of round 9001
    let local_db = Database::connect(&local_db_url).await.unwrap();
    local_db.init_schema().await.unwrap();
    local_db
        .upsert_round(&RoundRecord {
            round_id: 9001,
            date_ms: 1_700_000_000_000,
            course_name: "Stale Name".to_string(),
            total_holes: Some(9),
            total_shots: Some(40),
        })
        .await
        .unwrap();
    local_db
        .insert_shot(&ShotRecord {
            round_id: 9001,
            hole: 1,
            shot_number: 1,
            club: Club::PitchingWedge,
            shot_type: ShotType::Chip,
            latitude: 36.57,
            longitude: -121.94,
            accuracy: None,
            distance: None,
            timestamp_ms: 1_700_000_000_000,
        })
        .await
        .unwrap();

    let (server_url, _handle) = start_test_server(&remote_db_url).await;
    let client = reqwest::Client::new();
    seed_round(&client, &server_url, 9001, "Fresh Name", "2025-08-10T07:00:00Z", 2, 1).await;

    let summary = run_sync(&server_url, &local_db_url).await.unwrap();
    assert_eq!(summary.rounds_imported, 1);
    assert_eq!(summary.shots_imported, 2);

    // The import replaced the round and its children wholesale
    let local = SqlitePool::connect(&local_db_url).await.unwrap();
    let round_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rounds")
        .fetch_one(&local)
        .await
        .unwrap();
    assert_eq!(round_count, 1);

    let course: String = sqlx::query_scalar("SELECT course_name FROM rounds WHERE round_id = 9001")
        .fetch_one(&local)
        .await
        .unwrap();
    assert_eq!(course, "Fresh Name");

    let shot_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shots WHERE round_id = 9001")
        .fetch_one(&local)
        .await
        .unwrap();
    assert_eq!(shot_count, 2);
}
