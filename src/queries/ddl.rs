use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Index, IndexOrder, PostgresQueryBuilder,
    SqliteQueryBuilder, Table,
};

use crate::schema::{Holes, Rounds, Shots};

/// CREATE TABLE IF NOT EXISTS rounds (
///     round_id BIGINT PRIMARY KEY,
///     date_ms BIGINT NOT NULL,
///     course_name VARCHAR(255),
///     total_holes INTEGER,
///     total_shots INTEGER,
///     total_score INTEGER,
///     weather VARCHAR(100),
///     notes TEXT,
///     synced_to_local BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at_ms BIGINT NOT NULL
/// )
pub fn create_rounds_table() -> String {
    Table::create()
        .table(Rounds::Table)
        .if_not_exists()
        .col(ColumnDef::new(Rounds::RoundId).big_integer().primary_key())
        .col(ColumnDef::new(Rounds::DateMs).big_integer().not_null())
        .col(ColumnDef::new(Rounds::CourseName).string_len(255))
        .col(ColumnDef::new(Rounds::TotalHoles).integer())
        .col(ColumnDef::new(Rounds::TotalShots).integer())
        .col(ColumnDef::new(Rounds::TotalScore).integer())
        .col(ColumnDef::new(Rounds::Weather).string_len(100))
        .col(ColumnDef::new(Rounds::Notes).text())
        .col(
            ColumnDef::new(Rounds::SyncedToLocal)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(ColumnDef::new(Rounds::CreatedAtMs).big_integer().not_null())
        .to_string(SqliteQueryBuilder)
}

/// CREATE TABLE IF NOT EXISTS shots (
///     shot_id INTEGER PRIMARY KEY AUTOINCREMENT,
///     round_id BIGINT NOT NULL REFERENCES rounds(round_id) ON DELETE CASCADE,
///     hole INTEGER NOT NULL,
///     shot_number INTEGER NOT NULL,
///     club VARCHAR(50) NOT NULL,
///     shot_type VARCHAR(50) NOT NULL,
///     latitude DOUBLE NOT NULL,
///     longitude DOUBLE NOT NULL,
///     accuracy REAL,
///     distance INTEGER,
///     elevation_change REAL,
///     wind_speed INTEGER,
///     wind_direction VARCHAR(10),
///     timestamp_ms BIGINT,
///     created_at_ms BIGINT NOT NULL
/// )
pub fn create_shots_table() -> String {
    Table::create()
        .table(Shots::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Shots::ShotId)
                .integer()
                .primary_key()
                .auto_increment(),
        )
        .col(ColumnDef::new(Shots::RoundId).big_integer().not_null())
        .col(ColumnDef::new(Shots::Hole).integer().not_null())
        .col(ColumnDef::new(Shots::ShotNumber).integer().not_null())
        .col(ColumnDef::new(Shots::Club).string_len(50).not_null())
        .col(ColumnDef::new(Shots::ShotType).string_len(50).not_null())
        .col(ColumnDef::new(Shots::Latitude).double().not_null())
        .col(ColumnDef::new(Shots::Longitude).double().not_null())
        .col(ColumnDef::new(Shots::Accuracy).float())
        .col(ColumnDef::new(Shots::Distance).integer())
        .col(ColumnDef::new(Shots::ElevationChange).float())
        .col(ColumnDef::new(Shots::WindSpeed).integer())
        .col(ColumnDef::new(Shots::WindDirection).string_len(10))
        .col(ColumnDef::new(Shots::TimestampMs).big_integer())
        .col(ColumnDef::new(Shots::CreatedAtMs).big_integer().not_null())
        .foreign_key(
            ForeignKey::create()
                .from(Shots::Table, Shots::RoundId)
                .to(Rounds::Table, Rounds::RoundId)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_string(SqliteQueryBuilder)
}

/// CREATE TABLE IF NOT EXISTS holes (
///     hole_id INTEGER PRIMARY KEY AUTOINCREMENT,
///     round_id BIGINT NOT NULL REFERENCES rounds(round_id) ON DELETE CASCADE,
///     hole_number INTEGER NOT NULL,
///     score INTEGER NOT NULL,
///     par INTEGER,
///     fairway_hit BOOLEAN,
///     green_in_regulation BOOLEAN,
///     putts INTEGER,
///     notes TEXT,
///     created_at_ms BIGINT NOT NULL
/// )
pub fn create_holes_table() -> String {
    Table::create()
        .table(Holes::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Holes::HoleId)
                .integer()
                .primary_key()
                .auto_increment(),
        )
        .col(ColumnDef::new(Holes::RoundId).big_integer().not_null())
        .col(ColumnDef::new(Holes::HoleNumber).integer().not_null())
        .col(ColumnDef::new(Holes::Score).integer().not_null())
        .col(ColumnDef::new(Holes::Par).integer())
        .col(ColumnDef::new(Holes::FairwayHit).boolean())
        .col(ColumnDef::new(Holes::GreenInRegulation).boolean())
        .col(ColumnDef::new(Holes::Putts).integer())
        .col(ColumnDef::new(Holes::Notes).text())
        .col(ColumnDef::new(Holes::CreatedAtMs).big_integer().not_null())
        .foreign_key(
            ForeignKey::create()
                .from(Holes::Table, Holes::RoundId)
                .to(Rounds::Table, Rounds::RoundId)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_string(SqliteQueryBuilder)
}

/// CREATE INDEX IF NOT EXISTS idx_shots_round_id ON shots(round_id)
pub fn create_shots_round_id_index() -> String {
    Index::create()
        .if_not_exists()
        .name("idx_shots_round_id")
        .table(Shots::Table)
        .col(Shots::RoundId)
        .to_string(SqliteQueryBuilder)
}

/// CREATE INDEX IF NOT EXISTS idx_holes_round_id ON holes(round_id)
pub fn create_holes_round_id_index() -> String {
    Index::create()
        .if_not_exists()
        .name("idx_holes_round_id")
        .table(Holes::Table)
        .col(Holes::RoundId)
        .to_string(SqliteQueryBuilder)
}

/// CREATE INDEX IF NOT EXISTS idx_rounds_date ON rounds(date_ms DESC)
pub fn create_rounds_date_index() -> String {
    Index::create()
        .if_not_exists()
        .name("idx_rounds_date")
        .table(Rounds::Table)
        .col((Rounds::DateMs, IndexOrder::Desc))
        .to_string(SqliteQueryBuilder)
}

/// CREATE INDEX IF NOT EXISTS idx_rounds_synced ON rounds(synced_to_local)
pub fn create_rounds_synced_index() -> String {
    Index::create()
        .if_not_exists()
        .name("idx_rounds_synced")
        .table(Rounds::Table)
        .col(Rounds::SyncedToLocal)
        .to_string(SqliteQueryBuilder)
}

// ============================================================================
// PostgreSQL variants
// ============================================================================

/// CREATE TABLE IF NOT EXISTS rounds - PostgreSQL
pub fn create_rounds_table_pg() -> String {
    Table::create()
        .table(Rounds::Table)
        .if_not_exists()
        .col(ColumnDef::new(Rounds::RoundId).big_integer().primary_key())
        .col(ColumnDef::new(Rounds::DateMs).big_integer().not_null())
        .col(ColumnDef::new(Rounds::CourseName).string_len(255))
        .col(ColumnDef::new(Rounds::TotalHoles).integer())
        .col(ColumnDef::new(Rounds::TotalShots).integer())
        .col(ColumnDef::new(Rounds::TotalScore).integer())
        .col(ColumnDef::new(Rounds::Weather).string_len(100))
        .col(ColumnDef::new(Rounds::Notes).text())
        .col(
            ColumnDef::new(Rounds::SyncedToLocal)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(ColumnDef::new(Rounds::CreatedAtMs).big_integer().not_null())
        .to_string(PostgresQueryBuilder)
}

/// CREATE TABLE IF NOT EXISTS shots - PostgreSQL
/// Note: Uses BIGSERIAL instead of INTEGER AUTOINCREMENT
pub fn create_shots_table_pg() -> String {
    Table::create()
        .table(Shots::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Shots::ShotId)
                .big_integer()
                .primary_key()
                .auto_increment(),
        )
        .col(ColumnDef::new(Shots::RoundId).big_integer().not_null())
        .col(ColumnDef::new(Shots::Hole).integer().not_null())
        .col(ColumnDef::new(Shots::ShotNumber).integer().not_null())
        .col(ColumnDef::new(Shots::Club).string_len(50).not_null())
        .col(ColumnDef::new(Shots::ShotType).string_len(50).not_null())
        .col(ColumnDef::new(Shots::Latitude).double().not_null())
        .col(ColumnDef::new(Shots::Longitude).double().not_null())
        .col(ColumnDef::new(Shots::Accuracy).float())
        .col(ColumnDef::new(Shots::Distance).integer())
        .col(ColumnDef::new(Shots::ElevationChange).float())
        .col(ColumnDef::new(Shots::WindSpeed).integer())
        .col(ColumnDef::new(Shots::WindDirection).string_len(10))
        .col(ColumnDef::new(Shots::TimestampMs).big_integer())
        .col(ColumnDef::new(Shots::CreatedAtMs).big_integer().not_null())
        .foreign_key(
            ForeignKey::create()
                .from(Shots::Table, Shots::RoundId)
                .to(Rounds::Table, Rounds::RoundId)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_string(PostgresQueryBuilder)
}

/// CREATE TABLE IF NOT EXISTS holes - PostgreSQL
pub fn create_holes_table_pg() -> String {
    Table::create()
        .table(Holes::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Holes::HoleId)
                .big_integer()
                .primary_key()
                .auto_increment(),
        )
        .col(ColumnDef::new(Holes::RoundId).big_integer().not_null())
        .col(ColumnDef::new(Holes::HoleNumber).integer().not_null())
        .col(ColumnDef::new(Holes::Score).integer().not_null())
        .col(ColumnDef::new(Holes::Par).integer())
        .col(ColumnDef::new(Holes::FairwayHit).boolean())
        .col(ColumnDef::new(Holes::GreenInRegulation).boolean())
        .col(ColumnDef::new(Holes::Putts).integer())
        .col(ColumnDef::new(Holes::Notes).text())
        .col(ColumnDef::new(Holes::CreatedAtMs).big_integer().not_null())
        .foreign_key(
            ForeignKey::create()
                .from(Holes::Table, Holes::RoundId)
                .to(Rounds::Table, Rounds::RoundId)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_string(PostgresQueryBuilder)
}

/// CREATE INDEX IF NOT EXISTS idx_shots_round_id - PostgreSQL
pub fn create_shots_round_id_index_pg() -> String {
    Index::create()
        .if_not_exists()
        .name("idx_shots_round_id")
        .table(Shots::Table)
        .col(Shots::RoundId)
        .to_string(PostgresQueryBuilder)
}

/// CREATE INDEX IF NOT EXISTS idx_holes_round_id - PostgreSQL
pub fn create_holes_round_id_index_pg() -> String {
    Index::create()
        .if_not_exists()
        .name("idx_holes_round_id")
        .table(Holes::Table)
        .col(Holes::RoundId)
        .to_string(PostgresQueryBuilder)
}

/// CREATE INDEX IF NOT EXISTS idx_rounds_date - PostgreSQL
pub fn create_rounds_date_index_pg() -> String {
    Index::create()
        .if_not_exists()
        .name("idx_rounds_date")
        .table(Rounds::Table)
        .col((Rounds::DateMs, IndexOrder::Desc))
        .to_string(PostgresQueryBuilder)
}

/// CREATE INDEX IF NOT EXISTS idx_rounds_synced - PostgreSQL
pub fn create_rounds_synced_index_pg() -> String {
    Index::create()
        .if_not_exists()
        .name("idx_rounds_synced")
        .table(Rounds::Table)
        .col(Rounds::SyncedToLocal)
        .to_string(PostgresQueryBuilder)
}
