use reqwest::blocking::Client;
use serde::Deserialize;

use crate::config::SyncConfig;
use crate::db::Database;
use crate::records::RoundExport;

#[derive(Debug, Deserialize)]
struct ExportEnvelope {
    success: bool,
    #[serde(default)]
    data: Vec<RoundExport>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AckResponse {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Totals from one sync run
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub rounds_imported: usize,
    pub shots_imported: usize,
    pub holes_imported: usize,
}

/// Pull every unsynced round from the remote server into the local database.
///
/// Each round is imported transactionally with its original ids, then
/// acknowledged with POST /api/mark-synced/{round_id} so the remote stops
/// exporting it. Any failure aborts the run; rounds already imported and
/// acknowledged stay synced, the failed round is retried on the next run.
pub fn sync_rounds(
    config: &SyncConfig,
) -> Result<SyncSummary, Box<dyn std::error::Error + Send + Sync>> {
    let client = Client::new();
    let remote = config.remote_base();

    // Database work runs on an embedded runtime; the HTTP side stays blocking
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    println!("Fetching unsynced rounds from {}...", remote);
    let export_url = format!("{}/api/export/unsynced", remote);
    let envelope: ExportEnvelope = client
        .get(&export_url)
        .send()
        .map_err(|e| format!("Network error fetching unsynced rounds: {}", e))?
        .json()
        .map_err(|e| format!("Failed to parse export JSON: {}", e))?;

    if !envelope.success {
        return Err(format!(
            "Remote export failed: {}",
            envelope.error.unwrap_or_else(|| "unknown error".to_string())
        )
        .into());
    }

    if envelope.data.is_empty() {
        println!("Nothing to sync: remote has no unsynced rounds");
        return Ok(SyncSummary::default());
    }

    println!("Remote has {} unsynced round(s)", envelope.data.len());

    let db = rt
        .block_on(Database::connect(&config.database_url))
        .map_err(|e| format!("Failed to connect to local database: {}", e))?;
    rt.block_on(db.init_schema())?;

    let mut summary = SyncSummary::default();
    for export in &envelope.data {
        let round_id = export.round.round_id;
        println!(
            "[{}]   Importing '{}' ({} shots, {} holes)...",
            round_id,
            export.round.course_name.as_deref().unwrap_or(""),
            export.shots.len(),
            export.holes.len()
        );

        rt.block_on(db.import_round(export))
            .map_err(|e| format!("Failed to import round {}: {}", round_id, e))?;

        println!("[{}]   Marking as synced on remote...", round_id);
        let mark_url = format!("{}/api/mark-synced/{}", remote, round_id);
        let ack: AckResponse = client
            .post(&mark_url)
            .send()
            .map_err(|e| format!("Network error marking round {} synced: {}", round_id, e))?
            .json()
            .map_err(|e| format!("Failed to parse mark-synced JSON: {}", e))?;

        if !ack.success {
            return Err(format!(
                "Remote refused to mark round {} as synced: {}",
                round_id,
                ack.error.unwrap_or_else(|| "unknown error".to_string())
            )
            .into());
        }

        summary.rounds_imported += 1;
        summary.shots_imported += export.shots.len();
        summary.holes_imported += export.holes.len();
    }

    println!(
        "\n✓ Synced {} round(s) ({} shots, {} holes)",
        summary.rounds_imported, summary.shots_imported, summary.holes_imported
    );

    Ok(summary)
}
