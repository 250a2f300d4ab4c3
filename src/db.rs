//! Storage layer over SQLite or PostgreSQL.
//!
//! One `Database` value wraps whichever sqlx pool the connection URL selects;
//! every operation renders its SQL through the queries modules with the
//! matching backend builder. PostgreSQL is the deployment backend, SQLite
//! covers local use and tests.

use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use crate::config::normalize_database_url;
use crate::error::AppError;
use crate::queries::{ddl, holes, rounds, shots};
use crate::records::{
    now_ms, HoleRecord, HoleRow, RoundExport, RoundRecord, RoundRow, ShotRecord, ShotRow,
};

#[derive(Clone)]
pub enum Database {
    Sqlite(SqlitePool),
    Postgres(PgPool),
}

impl Database {
    /// Connect according to the URL scheme.
    ///
    /// PostgreSQL targets are created on demand; SQLite files are created
    /// when missing, with WAL journaling and foreign keys enabled.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let normalized = normalize_database_url(database_url);
        let parsed = url::Url::parse(&normalized)
            .map_err(|e| AppError::Connectivity(format!("invalid database url: {}", e)))?;

        match parsed.scheme() {
            "postgresql" => {
                create_database_if_not_exists(&parsed).await?;
                let options = PgConnectOptions::from_str(&normalized)?;
                let pool = PgPoolOptions::new()
                    .max_connections(5)
                    .connect_with(options)
                    .await?;
                Ok(Database::Postgres(pool))
            }
            "sqlite" => {
                let options = SqliteConnectOptions::from_str(&normalized)?
                    .create_if_missing(true)
                    .journal_mode(SqliteJournalMode::Wal)
                    .foreign_keys(true);
                let pool = SqlitePoolOptions::new()
                    .max_connections(5)
                    .connect_with(options)
                    .await?;
                Ok(Database::Sqlite(pool))
            }
            other => Err(AppError::Connectivity(format!(
                "unsupported database url scheme: {}",
                other
            ))),
        }
    }

    /// Short backend label for startup output
    pub fn backend_name(&self) -> &'static str {
        match self {
            Database::Sqlite(_) => "sqlite",
            Database::Postgres(_) => "postgresql",
        }
    }

    /// Create tables and indexes; idempotent, runs at every startup
    pub async fn init_schema(&self) -> Result<(), AppError> {
        match self {
            Database::Sqlite(pool) => {
                for sql in [
                    ddl::create_rounds_table(),
                    ddl::create_shots_table(),
                    ddl::create_holes_table(),
                    ddl::create_shots_round_id_index(),
                    ddl::create_holes_round_id_index(),
                    ddl::create_rounds_date_index(),
                    ddl::create_rounds_synced_index(),
                ] {
                    sqlx::query(&sql).execute(pool).await?;
                }
            }
            Database::Postgres(pool) => {
                for sql in [
                    ddl::create_rounds_table_pg(),
                    ddl::create_shots_table_pg(),
                    ddl::create_holes_table_pg(),
                    ddl::create_shots_round_id_index_pg(),
                    ddl::create_holes_round_id_index_pg(),
                    ddl::create_rounds_date_index_pg(),
                    ddl::create_rounds_synced_index_pg(),
                ] {
                    sqlx::query(&sql).execute(pool).await?;
                }
            }
        }
        Ok(())
    }

    /// Trivial round-trip query for the health check
    pub async fn ping(&self) -> Result<(), AppError> {
        match self {
            Database::Sqlite(pool) => {
                sqlx::query("SELECT 1").execute(pool).await?;
            }
            Database::Postgres(pool) => {
                sqlx::query("SELECT 1").execute(pool).await?;
            }
        }
        Ok(())
    }

    /// Insert a placeholder round row unless one already exists, so shots and
    /// holes recorded before any round upsert satisfy the foreign key
    pub async fn ensure_round(&self, round_id: i64, date_ms: i64) -> Result<(), AppError> {
        let created_at_ms = now_ms();
        let sql = match self {
            Database::Sqlite(_) => rounds::insert_or_ignore(round_id, date_ms, created_at_ms),
            Database::Postgres(_) => rounds::insert_or_ignore_pg(round_id, date_ms, created_at_ms),
        };
        self.execute(&sql).await?;
        Ok(())
    }

    /// Append one shot row, returning the assigned shot_id
    pub async fn insert_shot(&self, shot: &ShotRecord) -> Result<i64, AppError> {
        let created_at_ms = now_ms();
        let shot_id: i64 = match self {
            Database::Sqlite(pool) => {
                let sql = shots::insert(shot, created_at_ms);
                sqlx::query_scalar(&sql).fetch_one(pool).await?
            }
            Database::Postgres(pool) => {
                let sql = shots::insert_pg(shot, created_at_ms);
                sqlx::query_scalar(&sql).fetch_one(pool).await?
            }
        };
        Ok(shot_id)
    }

    /// Append one hole summary row
    pub async fn insert_hole(&self, hole: &HoleRecord) -> Result<(), AppError> {
        let created_at_ms = now_ms();
        let sql = match self {
            Database::Sqlite(_) => holes::insert(hole, created_at_ms),
            Database::Postgres(_) => holes::insert_pg(hole, created_at_ms),
        };
        self.execute(&sql).await?;
        Ok(())
    }

    /// Insert a round, or update its summary fields when the round_id exists.
    /// Never touches synced_to_local or created_at_ms.
    pub async fn upsert_round(&self, round: &RoundRecord) -> Result<(), AppError> {
        let created_at_ms = now_ms();
        let sql = match self {
            Database::Sqlite(_) => rounds::upsert(round, created_at_ms),
            Database::Postgres(_) => rounds::upsert_pg(round, created_at_ms),
        };
        self.execute(&sql).await?;
        Ok(())
    }

    /// Every round still flagged unsynced, newest first, each expanded with
    /// its ordered shots and holes. One list query, then two lookups per
    /// round, the same read shape as the export endpoint has always had.
    pub async fn unsynced_rounds(&self) -> Result<Vec<RoundExport>, AppError> {
        match self {
            Database::Sqlite(pool) => {
                let round_rows: Vec<RoundRow> = sqlx::query_as(&rounds::select_unsynced())
                    .fetch_all(pool)
                    .await?;
                let mut out = Vec::with_capacity(round_rows.len());
                for round in round_rows {
                    let shot_rows: Vec<ShotRow> =
                        sqlx::query_as(&shots::select_by_round(round.round_id))
                            .fetch_all(pool)
                            .await?;
                    let hole_rows: Vec<HoleRow> =
                        sqlx::query_as(&holes::select_by_round(round.round_id))
                            .fetch_all(pool)
                            .await?;
                    out.push(RoundExport {
                        round,
                        shots: shot_rows,
                        holes: hole_rows,
                    });
                }
                Ok(out)
            }
            Database::Postgres(pool) => {
                let round_rows: Vec<RoundRow> = sqlx::query_as(&rounds::select_unsynced_pg())
                    .fetch_all(pool)
                    .await?;
                let mut out = Vec::with_capacity(round_rows.len());
                for round in round_rows {
                    let shot_rows: Vec<ShotRow> =
                        sqlx::query_as(&shots::select_by_round_pg(round.round_id))
                            .fetch_all(pool)
                            .await?;
                    let hole_rows: Vec<HoleRow> =
                        sqlx::query_as(&holes::select_by_round_pg(round.round_id))
                            .fetch_all(pool)
                            .await?;
                    out.push(RoundExport {
                        round,
                        shots: shot_rows,
                        holes: hole_rows,
                    });
                }
                Ok(out)
            }
        }
    }

    /// Flip synced_to_local on; returns the number of rows affected.
    /// Zero rows (unknown round_id, or already synced) is not an error.
    pub async fn mark_round_synced(&self, round_id: i64) -> Result<u64, AppError> {
        let sql = match self {
            Database::Sqlite(_) => rounds::mark_synced(round_id),
            Database::Postgres(_) => rounds::mark_synced_pg(round_id),
        };
        self.execute(&sql).await
    }

    /// Import one exported round document transactionally, replacing any
    /// previous local copy (cascade delete) and preserving all original ids
    pub async fn import_round(&self, export: &RoundExport) -> Result<(), AppError> {
        match self {
            Database::Sqlite(pool) => {
                let mut tx = pool.begin().await?;
                sqlx::query(&rounds::delete(export.round.round_id))
                    .execute(&mut *tx)
                    .await?;
                sqlx::query(&rounds::insert_row(&export.round))
                    .execute(&mut *tx)
                    .await?;
                for shot in &export.shots {
                    sqlx::query(&shots::insert_with_id(shot))
                        .execute(&mut *tx)
                        .await?;
                }
                for hole in &export.holes {
                    sqlx::query(&holes::insert_with_id(hole))
                        .execute(&mut *tx)
                        .await?;
                }
                tx.commit().await?;
            }
            Database::Postgres(pool) => {
                let mut tx = pool.begin().await?;
                sqlx::query(&rounds::delete_pg(export.round.round_id))
                    .execute(&mut *tx)
                    .await?;
                sqlx::query(&rounds::insert_row_pg(&export.round))
                    .execute(&mut *tx)
                    .await?;
                for shot in &export.shots {
                    sqlx::query(&shots::insert_with_id_pg(shot))
                        .execute(&mut *tx)
                        .await?;
                }
                for hole in &export.holes {
                    sqlx::query(&holes::insert_with_id_pg(hole))
                        .execute(&mut *tx)
                        .await?;
                }
                tx.commit().await?;
            }
        }
        Ok(())
    }

    async fn execute(&self, sql: &str) -> Result<u64, AppError> {
        let affected = match self {
            Database::Sqlite(pool) => sqlx::query(sql).execute(pool).await?.rows_affected(),
            Database::Postgres(pool) => sqlx::query(sql).execute(pool).await?.rows_affected(),
        };
        Ok(affected)
    }
}

/// Connect to the admin database and create the target database unless it
/// already exists. Tolerates losing the creation race to another process
/// (PostgreSQL error 42P04, duplicate_database).
async fn create_database_if_not_exists(target: &url::Url) -> Result<(), AppError> {
    let database = target.path().trim_start_matches('/').to_string();
    if database.is_empty() {
        return Err(AppError::Connectivity(
            "missing database name in postgres url".to_string(),
        ));
    }

    let mut admin_url = target.clone();
    admin_url.set_path("/postgres");
    let admin_options = PgConnectOptions::from_str(admin_url.as_str())?;
    let admin_pool = PgPoolOptions::new()
        .max_connections(1)
        .connect_with(admin_options)
        .await?;

    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&database)
            .fetch_one(&admin_pool)
            .await?;

    if !exists {
        // CREATE DATABASE cannot use prepared statements, so quote by hand
        let create_sql = format!("CREATE DATABASE \"{}\"", database.replace('"', "\"\""));
        if let Err(e) = sqlx::query(&create_sql).execute(&admin_pool).await {
            let err_str = e.to_string();
            if !err_str.contains("already exists") && !err_str.contains("42P04") {
                return Err(e.into());
            }
        }
    }

    admin_pool.close().await;
    Ok(())
}
