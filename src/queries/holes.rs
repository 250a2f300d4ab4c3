use sea_query::{Expr, Order, PostgresQueryBuilder, Query, SqliteQueryBuilder};

use crate::records::{HoleRecord, HoleRow};
use crate::schema::Holes;

fn all_columns() -> [Holes; 10] {
    [
        Holes::HoleId,
        Holes::RoundId,
        Holes::HoleNumber,
        Holes::Score,
        Holes::Par,
        Holes::FairwayHit,
        Holes::GreenInRegulation,
        Holes::Putts,
        Holes::Notes,
        Holes::CreatedAtMs,
    ]
}

/// INSERT INTO holes (round_id, hole_number, score, notes, created_at_ms)
/// VALUES (?, ?, ?, ?, ?)
///
/// Append-only; re-submitting the same hole number adds another row.
pub fn insert(hole: &HoleRecord, created_at_ms: i64) -> String {
    insert_statement(hole, created_at_ms).to_string(SqliteQueryBuilder)
}

fn insert_statement(hole: &HoleRecord, created_at_ms: i64) -> sea_query::InsertStatement {
    Query::insert()
        .into_table(Holes::Table)
        .columns([
            Holes::RoundId,
            Holes::HoleNumber,
            Holes::Score,
            Holes::Notes,
            Holes::CreatedAtMs,
        ])
        .values_panic([
            hole.round_id.into(),
            hole.hole_number.into(),
            hole.score.into(),
            hole.notes.clone().into(),
            created_at_ms.into(),
        ])
        .to_owned()
}

/// INSERT INTO holes (all columns) VALUES (...)
/// Used by the sync importer to preserve the original hole_id.
pub fn insert_with_id(row: &HoleRow) -> String {
    insert_with_id_statement(row).to_string(SqliteQueryBuilder)
}

fn insert_with_id_statement(row: &HoleRow) -> sea_query::InsertStatement {
    Query::insert()
        .into_table(Holes::Table)
        .columns(all_columns())
        .values_panic([
            row.hole_id.into(),
            row.round_id.into(),
            row.hole_number.into(),
            row.score.into(),
            row.par.into(),
            row.fairway_hit.into(),
            row.green_in_regulation.into(),
            row.putts.into(),
            row.notes.clone().into(),
            row.created_at_ms.into(),
        ])
        .to_owned()
}

/// SELECT * FROM holes WHERE round_id = ? ORDER BY hole_number
pub fn select_by_round(round_id: i64) -> String {
    select_by_round_statement(round_id).to_string(SqliteQueryBuilder)
}

fn select_by_round_statement(round_id: i64) -> sea_query::SelectStatement {
    Query::select()
        .columns(all_columns())
        .from(Holes::Table)
        .and_where(Expr::col(Holes::RoundId).eq(round_id))
        .order_by(Holes::HoleNumber, Order::Asc)
        .to_owned()
}

// ============================================================================
// PostgreSQL variants
// ============================================================================

/// Hole insert - PostgreSQL
pub fn insert_pg(hole: &HoleRecord, created_at_ms: i64) -> String {
    insert_statement(hole, created_at_ms).to_string(PostgresQueryBuilder)
}

/// Hole insert with explicit hole_id - PostgreSQL
pub fn insert_with_id_pg(row: &HoleRow) -> String {
    insert_with_id_statement(row).to_string(PostgresQueryBuilder)
}

/// Ordered holes for one round - PostgreSQL
pub fn select_by_round_pg(round_id: i64) -> String {
    select_by_round_statement(round_id).to_string(PostgresQueryBuilder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_carries_defaulted_notes() {
        let hole = HoleRecord {
            round_id: 1001,
            hole_number: 4,
            score: 5,
            notes: String::new(),
        };
        let sql = insert(&hole, 1);
        assert!(sql.contains("''"), "got: {}", sql);
        assert!(!sql.contains("RETURNING"), "got: {}", sql);
    }

    #[test]
    fn round_select_orders_by_hole_number() {
        let sql = select_by_round_pg(1001);
        assert!(sql.contains("ORDER BY \"hole_number\" ASC"), "got: {}", sql);
    }
}
