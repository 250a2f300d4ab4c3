use sea_query::{Expr, OnConflict, Order, PostgresQueryBuilder, Query, SqliteQueryBuilder};

use crate::records::{RoundRecord, RoundRow};
use crate::schema::Rounds;

fn all_columns() -> [Rounds; 10] {
    [
        Rounds::RoundId,
        Rounds::DateMs,
        Rounds::CourseName,
        Rounds::TotalHoles,
        Rounds::TotalShots,
        Rounds::TotalScore,
        Rounds::Weather,
        Rounds::Notes,
        Rounds::SyncedToLocal,
        Rounds::CreatedAtMs,
    ]
}

/// INSERT INTO rounds (round_id, date_ms, course_name, total_holes, total_shots, created_at_ms)
/// VALUES (?, ?, ?, ?, ?, ?)
/// ON CONFLICT (round_id) DO UPDATE SET course_name = excluded.course_name, ...
///
/// The summary-field upsert: an existing round keeps its round_id,
/// synced_to_local and created_at_ms, everything else is last-write-wins.
pub fn upsert(round: &RoundRecord, created_at_ms: i64) -> String {
    upsert_statement(round, created_at_ms).to_string(SqliteQueryBuilder)
}

fn upsert_statement(round: &RoundRecord, created_at_ms: i64) -> sea_query::InsertStatement {
    Query::insert()
        .into_table(Rounds::Table)
        .columns([
            Rounds::RoundId,
            Rounds::DateMs,
            Rounds::CourseName,
            Rounds::TotalHoles,
            Rounds::TotalShots,
            Rounds::CreatedAtMs,
        ])
        .values_panic([
            round.round_id.into(),
            round.date_ms.into(),
            round.course_name.clone().into(),
            round.total_holes.into(),
            round.total_shots.into(),
            created_at_ms.into(),
        ])
        .on_conflict(
            OnConflict::column(Rounds::RoundId)
                .update_columns([
                    Rounds::CourseName,
                    Rounds::TotalHoles,
                    Rounds::TotalShots,
                    Rounds::DateMs,
                ])
                .to_owned(),
        )
        .to_owned()
}

/// INSERT INTO rounds (round_id, date_ms, created_at_ms) VALUES (?, ?, ?)
/// ON CONFLICT DO NOTHING
///
/// Placeholder row so shots/holes recorded before any round upsert satisfy
/// the foreign key.
pub fn insert_or_ignore(round_id: i64, date_ms: i64, created_at_ms: i64) -> String {
    insert_or_ignore_statement(round_id, date_ms, created_at_ms).to_string(SqliteQueryBuilder)
}

fn insert_or_ignore_statement(
    round_id: i64,
    date_ms: i64,
    created_at_ms: i64,
) -> sea_query::InsertStatement {
    Query::insert()
        .into_table(Rounds::Table)
        .columns([Rounds::RoundId, Rounds::DateMs, Rounds::CreatedAtMs])
        .values_panic([round_id.into(), date_ms.into(), created_at_ms.into()])
        .on_conflict(OnConflict::new().do_nothing().to_owned())
        .to_owned()
}

/// INSERT INTO rounds (all columns) VALUES (...)
/// Used by the sync importer to carry a round over verbatim, flags included.
pub fn insert_row(row: &RoundRow) -> String {
    insert_row_statement(row).to_string(SqliteQueryBuilder)
}

fn insert_row_statement(row: &RoundRow) -> sea_query::InsertStatement {
    Query::insert()
        .into_table(Rounds::Table)
        .columns(all_columns())
        .values_panic([
            row.round_id.into(),
            row.date_ms.into(),
            row.course_name.clone().into(),
            row.total_holes.into(),
            row.total_shots.into(),
            row.total_score.into(),
            row.weather.clone().into(),
            row.notes.clone().into(),
            row.synced_to_local.into(),
            row.created_at_ms.into(),
        ])
        .to_owned()
}

/// SELECT * FROM rounds WHERE synced_to_local = FALSE ORDER BY date_ms DESC
pub fn select_unsynced() -> String {
    select_unsynced_statement().to_string(SqliteQueryBuilder)
}

fn select_unsynced_statement() -> sea_query::SelectStatement {
    Query::select()
        .columns(all_columns())
        .from(Rounds::Table)
        .and_where(Expr::col(Rounds::SyncedToLocal).eq(false))
        .order_by(Rounds::DateMs, Order::Desc)
        .to_owned()
}

/// UPDATE rounds SET synced_to_local = TRUE WHERE round_id = ?
pub fn mark_synced(round_id: i64) -> String {
    mark_synced_statement(round_id).to_string(SqliteQueryBuilder)
}

fn mark_synced_statement(round_id: i64) -> sea_query::UpdateStatement {
    Query::update()
        .table(Rounds::Table)
        .value(Rounds::SyncedToLocal, true)
        .and_where(Expr::col(Rounds::RoundId).eq(round_id))
        .to_owned()
}

/// DELETE FROM rounds WHERE round_id = ?
/// Cascades to shots and holes; only the sync importer uses this.
pub fn delete(round_id: i64) -> String {
    delete_statement(round_id).to_string(SqliteQueryBuilder)
}

fn delete_statement(round_id: i64) -> sea_query::DeleteStatement {
    Query::delete()
        .from_table(Rounds::Table)
        .and_where(Expr::col(Rounds::RoundId).eq(round_id))
        .to_owned()
}

// ============================================================================
// PostgreSQL variants
// ============================================================================

/// Round upsert - PostgreSQL
pub fn upsert_pg(round: &RoundRecord, created_at_ms: i64) -> String {
    upsert_statement(round, created_at_ms).to_string(PostgresQueryBuilder)
}

/// Placeholder insert-or-ignore - PostgreSQL
pub fn insert_or_ignore_pg(round_id: i64, date_ms: i64, created_at_ms: i64) -> String {
    insert_or_ignore_statement(round_id, date_ms, created_at_ms).to_string(PostgresQueryBuilder)
}

/// Verbatim row insert - PostgreSQL
pub fn insert_row_pg(row: &RoundRow) -> String {
    insert_row_statement(row).to_string(PostgresQueryBuilder)
}

/// Unsynced rounds, newest first - PostgreSQL
pub fn select_unsynced_pg() -> String {
    select_unsynced_statement().to_string(PostgresQueryBuilder)
}

/// Mark one round synced - PostgreSQL
pub fn mark_synced_pg(round_id: i64) -> String {
    mark_synced_statement(round_id).to_string(PostgresQueryBuilder)
}

/// Delete one round - PostgreSQL
pub fn delete_pg(round_id: i64) -> String {
    delete_statement(round_id).to_string(PostgresQueryBuilder)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> RoundRecord {
        RoundRecord {
            round_id: 1001,
            date_ms: 1_748_773_800_000,
            course_name: "Pebble Creek".to_string(),
            total_holes: Some(18),
            total_shots: Some(84),
        }
    }

    #[test]
    fn upsert_updates_summary_fields_only() {
        let sql = upsert_pg(&sample_record(), 1);
        assert!(sql.contains("ON CONFLICT"), "got: {}", sql);
        for updated in ["course_name", "total_holes", "total_shots", "date_ms"] {
            assert!(
                sql.contains(&format!("\"{}\" = \"excluded\".\"{}\"", updated, updated)),
                "missing {} in: {}",
                updated,
                sql
            );
        }
        assert!(!sql.contains("\"synced_to_local\" = \"excluded\""), "got: {}", sql);
        assert!(!sql.contains("\"created_at_ms\" = \"excluded\""), "got: {}", sql);
    }

    #[test]
    fn placeholder_insert_is_conflict_free() {
        let sql = insert_or_ignore(42, 5, 6);
        assert!(sql.contains("ON CONFLICT"), "got: {}", sql);
        assert!(sql.contains("DO NOTHING"), "got: {}", sql);
    }

    #[test]
    fn unsynced_select_filters_and_orders() {
        let sql = select_unsynced();
        assert!(sql.contains("\"synced_to_local\" = FALSE"), "got: {}", sql);
        assert!(sql.contains("ORDER BY \"date_ms\" DESC"), "got: {}", sql);
    }
}
