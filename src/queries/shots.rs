use sea_query::{Expr, Order, PostgresQueryBuilder, Query, SqliteQueryBuilder};

use crate::records::{ShotRecord, ShotRow};
use crate::schema::Shots;

fn all_columns() -> [Shots; 15] {
    [
        Shots::ShotId,
        Shots::RoundId,
        Shots::Hole,
        Shots::ShotNumber,
        Shots::Club,
        Shots::ShotType,
        Shots::Latitude,
        Shots::Longitude,
        Shots::Accuracy,
        Shots::Distance,
        Shots::ElevationChange,
        Shots::WindSpeed,
        Shots::WindDirection,
        Shots::TimestampMs,
        Shots::CreatedAtMs,
    ]
}

/// INSERT INTO shots (round_id, hole, shot_number, club, shot_type, latitude,
/// longitude, accuracy, distance, timestamp_ms, created_at_ms)
/// VALUES (...) RETURNING shot_id
///
/// Always appends; duplicate (round_id, hole, shot_number) rows are allowed.
pub fn insert(shot: &ShotRecord, created_at_ms: i64) -> String {
    insert_statement(shot, created_at_ms).to_string(SqliteQueryBuilder)
}

fn insert_statement(shot: &ShotRecord, created_at_ms: i64) -> sea_query::InsertStatement {
    Query::insert()
        .into_table(Shots::Table)
        .columns([
            Shots::RoundId,
            Shots::Hole,
            Shots::ShotNumber,
            Shots::Club,
            Shots::ShotType,
            Shots::Latitude,
            Shots::Longitude,
            Shots::Accuracy,
            Shots::Distance,
            Shots::TimestampMs,
            Shots::CreatedAtMs,
        ])
        .values_panic([
            shot.round_id.into(),
            shot.hole.into(),
            shot.shot_number.into(),
            shot.club.as_str().into(),
            shot.shot_type.as_str().into(),
            shot.latitude.into(),
            shot.longitude.into(),
            shot.accuracy.into(),
            shot.distance.into(),
            shot.timestamp_ms.into(),
            created_at_ms.into(),
        ])
        .returning_col(Shots::ShotId)
        .to_owned()
}

/// INSERT INTO shots (all columns) VALUES (...)
/// Used by the sync importer to preserve the original shot_id.
pub fn insert_with_id(row: &ShotRow) -> String {
    insert_with_id_statement(row).to_string(SqliteQueryBuilder)
}

fn insert_with_id_statement(row: &ShotRow) -> sea_query::InsertStatement {
    Query::insert()
        .into_table(Shots::Table)
        .columns(all_columns())
        .values_panic([
            row.shot_id.into(),
            row.round_id.into(),
            row.hole.into(),
            row.shot_number.into(),
            row.club.clone().into(),
            row.shot_type.clone().into(),
            row.latitude.into(),
            row.longitude.into(),
            row.accuracy.into(),
            row.distance.into(),
            row.elevation_change.into(),
            row.wind_speed.into(),
            row.wind_direction.clone().into(),
            row.timestamp_ms.into(),
            row.created_at_ms.into(),
        ])
        .to_owned()
}

/// SELECT * FROM shots WHERE round_id = ? ORDER BY hole, shot_number
pub fn select_by_round(round_id: i64) -> String {
    select_by_round_statement(round_id).to_string(SqliteQueryBuilder)
}

fn select_by_round_statement(round_id: i64) -> sea_query::SelectStatement {
    Query::select()
        .columns(all_columns())
        .from(Shots::Table)
        .and_where(Expr::col(Shots::RoundId).eq(round_id))
        .order_by(Shots::Hole, Order::Asc)
        .order_by(Shots::ShotNumber, Order::Asc)
        .to_owned()
}

// ============================================================================
// PostgreSQL variants
// ============================================================================

/// Shot insert with RETURNING shot_id - PostgreSQL
pub fn insert_pg(shot: &ShotRecord, created_at_ms: i64) -> String {
    insert_statement(shot, created_at_ms).to_string(PostgresQueryBuilder)
}

/// Shot insert with explicit shot_id - PostgreSQL
pub fn insert_with_id_pg(row: &ShotRow) -> String {
    insert_with_id_statement(row).to_string(PostgresQueryBuilder)
}

/// Ordered shots for one round - PostgreSQL
pub fn select_by_round_pg(round_id: i64) -> String {
    select_by_round_statement(round_id).to_string(PostgresQueryBuilder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Club, ShotType};

    fn sample_shot() -> ShotRecord {
        ShotRecord {
            round_id: 1001,
            hole: 1,
            shot_number: 1,
            club: Club::Driver,
            shot_type: ShotType::Tee,
            latitude: 36.5,
            longitude: -121.9,
            accuracy: None,
            distance: None,
            timestamp_ms: 1_748_773_800_000,
        }
    }

    #[test]
    fn insert_returns_the_new_id() {
        for sql in [insert(&sample_shot(), 1), insert_pg(&sample_shot(), 1)] {
            assert!(sql.contains("RETURNING \"shot_id\""), "got: {}", sql);
            assert!(sql.contains("'Driver'"), "got: {}", sql);
            assert!(sql.contains("'Tee'"), "got: {}", sql);
        }
    }

    #[test]
    fn absent_optionals_insert_null() {
        let sql = insert(&sample_shot(), 1);
        assert!(sql.contains("NULL"), "got: {}", sql);
    }

    #[test]
    fn round_select_orders_by_hole_then_shot_number() {
        let sql = select_by_round(1001);
        assert!(
            sql.contains("ORDER BY \"hole\" ASC, \"shot_number\" ASC"),
            "got: {}",
            sql
        );
    }
}
