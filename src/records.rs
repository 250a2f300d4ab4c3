//! Wire payloads, validated records, and stored row shapes.
//!
//! Ingestion payloads keep every field optional so that a missing required
//! field becomes a validation error with a useful message instead of a
//! deserializer rejection. Row structs mirror the table columns one to one
//! and double as the export document format.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Current time as epoch milliseconds, the storage representation for all
/// timestamps.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Parse a client-supplied timestamp into epoch milliseconds.
///
/// Accepts RFC 3339 (what `Date.toISOString()` produces) and the same shape
/// without a zone suffix, which is treated as UTC.
pub fn parse_timestamp_ms(value: &str) -> Result<i64, AppError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.timestamp_millis());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc().timestamp_millis());
    }
    Err(AppError::Validation(format!(
        "unparseable timestamp: {}",
        value
    )))
}

fn require<T>(value: Option<T>, name: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::Validation(format!("missing required field: {}", name)))
}

/// The fixed club set offered by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Club {
    Driver,
    #[serde(rename = "3 Wood")]
    ThreeWood,
    #[serde(rename = "5 Wood")]
    FiveWood,
    #[serde(rename = "2 Hybrid")]
    TwoHybrid,
    #[serde(rename = "3 Hybrid")]
    ThreeHybrid,
    #[serde(rename = "4 Hybrid")]
    FourHybrid,
    #[serde(rename = "3 Iron")]
    ThreeIron,
    #[serde(rename = "4 Iron")]
    FourIron,
    #[serde(rename = "5 Iron")]
    FiveIron,
    #[serde(rename = "6 Iron")]
    SixIron,
    #[serde(rename = "7 Iron")]
    SevenIron,
    #[serde(rename = "8 Iron")]
    EightIron,
    #[serde(rename = "9 Iron")]
    NineIron,
    #[serde(rename = "PW")]
    PitchingWedge,
    #[serde(rename = "GW")]
    GapWedge,
    #[serde(rename = "SW")]
    SandWedge,
    #[serde(rename = "LW")]
    LobWedge,
    Putter,
}

impl Club {
    /// Display label, also the stored column value
    pub fn as_str(&self) -> &'static str {
        match self {
            Club::Driver => "Driver",
            Club::ThreeWood => "3 Wood",
            Club::FiveWood => "5 Wood",
            Club::TwoHybrid => "2 Hybrid",
            Club::ThreeHybrid => "3 Hybrid",
            Club::FourHybrid => "4 Hybrid",
            Club::ThreeIron => "3 Iron",
            Club::FourIron => "4 Iron",
            Club::FiveIron => "5 Iron",
            Club::SixIron => "6 Iron",
            Club::SevenIron => "7 Iron",
            Club::EightIron => "8 Iron",
            Club::NineIron => "9 Iron",
            Club::PitchingWedge => "PW",
            Club::GapWedge => "GW",
            Club::SandWedge => "SW",
            Club::LobWedge => "LW",
            Club::Putter => "Putter",
        }
    }
}

/// Lie/stroke category for a shot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotType {
    Tee,
    Fairway,
    Rough,
    Sand,
    Chip,
    Putt,
    Recovery,
}

impl ShotType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShotType::Tee => "Tee",
            ShotType::Fairway => "Fairway",
            ShotType::Rough => "Rough",
            ShotType::Sand => "Sand",
            ShotType::Chip => "Chip",
            ShotType::Putt => "Putt",
            ShotType::Recovery => "Recovery",
        }
    }
}

/// POST /api/shot request body
#[derive(Debug, Deserialize)]
pub struct ShotPayload {
    pub round_id: Option<i64>,
    pub hole: Option<i32>,
    pub shot_number: Option<i32>,
    pub club: Option<Club>,
    pub shot_type: Option<ShotType>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub accuracy: Option<f32>,
    pub distance: Option<i32>,
    pub timestamp: Option<String>,
}

/// A shot that passed validation and is ready to insert
#[derive(Debug, Clone)]
pub struct ShotRecord {
    pub round_id: i64,
    pub hole: i32,
    pub shot_number: i32,
    pub club: Club,
    pub shot_type: ShotType,
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f32>,
    pub distance: Option<i32>,
    pub timestamp_ms: i64,
}

impl ShotPayload {
    pub fn into_record(self) -> Result<ShotRecord, AppError> {
        let timestamp_ms = match self.timestamp {
            Some(ref value) => parse_timestamp_ms(value)?,
            None => now_ms(),
        };
        Ok(ShotRecord {
            round_id: require(self.round_id, "round_id")?,
            hole: require(self.hole, "hole")?,
            shot_number: require(self.shot_number, "shot_number")?,
            club: require(self.club, "club")?,
            shot_type: require(self.shot_type, "shot_type")?,
            latitude: require(self.latitude, "latitude")?,
            longitude: require(self.longitude, "longitude")?,
            accuracy: self.accuracy,
            distance: self.distance,
            timestamp_ms,
        })
    }
}

/// POST /api/hole request body
#[derive(Debug, Deserialize)]
pub struct HolePayload {
    pub round_id: Option<i64>,
    pub hole: Option<i32>,
    pub score: Option<i32>,
    pub notes: Option<String>,
}

/// A hole summary that passed validation
#[derive(Debug, Clone)]
pub struct HoleRecord {
    pub round_id: i64,
    pub hole_number: i32,
    pub score: i32,
    pub notes: String,
}

impl HolePayload {
    pub fn into_record(self) -> Result<HoleRecord, AppError> {
        Ok(HoleRecord {
            round_id: require(self.round_id, "round_id")?,
            hole_number: require(self.hole, "hole")?,
            score: require(self.score, "score")?,
            notes: self.notes.unwrap_or_default(),
        })
    }
}

/// POST /api/round request body
#[derive(Debug, Deserialize)]
pub struct RoundPayload {
    pub round_id: Option<i64>,
    pub date: Option<String>,
    pub course_name: Option<String>,
    pub total_holes: Option<i32>,
    pub total_shots: Option<i32>,
}

/// A round summary that passed validation, ready for the upsert
#[derive(Debug, Clone)]
pub struct RoundRecord {
    pub round_id: i64,
    pub date_ms: i64,
    pub course_name: String,
    pub total_holes: Option<i32>,
    pub total_shots: Option<i32>,
}

impl RoundPayload {
    pub fn into_record(self) -> Result<RoundRecord, AppError> {
        let date_ms = match self.date {
            Some(ref value) => parse_timestamp_ms(value)?,
            None => now_ms(),
        };
        Ok(RoundRecord {
            round_id: require(self.round_id, "round_id")?,
            date_ms,
            course_name: self.course_name.unwrap_or_default(),
            total_holes: self.total_holes,
            total_shots: self.total_shots,
        })
    }
}

/// One stored round, full column set; also the export document shape
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RoundRow {
    pub round_id: i64,
    pub date_ms: i64,
    pub course_name: Option<String>,
    pub total_holes: Option<i32>,
    pub total_shots: Option<i32>,
    pub total_score: Option<i32>,
    pub weather: Option<String>,
    pub notes: Option<String>,
    pub synced_to_local: bool,
    pub created_at_ms: i64,
}

/// One stored shot, full column set
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ShotRow {
    pub shot_id: i64,
    pub round_id: i64,
    pub hole: i32,
    pub shot_number: i32,
    pub club: String,
    pub shot_type: String,
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f32>,
    pub distance: Option<i32>,
    pub elevation_change: Option<f32>,
    pub wind_speed: Option<i32>,
    pub wind_direction: Option<String>,
    pub timestamp_ms: Option<i64>,
    pub created_at_ms: i64,
}

/// One stored hole summary, full column set
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct HoleRow {
    pub hole_id: i64,
    pub round_id: i64,
    pub hole_number: i32,
    pub score: i32,
    pub par: Option<i32>,
    pub fairway_hit: Option<bool>,
    pub green_in_regulation: Option<bool>,
    pub putts: Option<i32>,
    pub notes: Option<String>,
    pub created_at_ms: i64,
}

/// One round expanded with its ordered shots and holes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundExport {
    pub round: RoundRow,
    pub shots: Vec<ShotRow>,
    pub holes: Vec<HoleRow>,
}

/// GET /api/export/unsynced response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportResponse {
    pub success: bool,
    pub data: Vec<RoundExport>,
}
