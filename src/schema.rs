use sea_query::Iden;

/// Rounds table - one row per outing, keyed by the client-generated round id
#[derive(Iden)]
pub enum Rounds {
    Table,
    RoundId,
    DateMs,
    CourseName,
    TotalHoles,
    TotalShots,
    TotalScore,
    Weather,
    Notes,
    SyncedToLocal,
    CreatedAtMs,
}

/// Shots table - individual geolocated strikes
#[derive(Iden)]
pub enum Shots {
    Table,
    ShotId,
    RoundId,
    Hole,
    ShotNumber,
    Club,
    ShotType,
    Latitude,
    Longitude,
    Accuracy,
    Distance,
    ElevationChange,
    WindSpeed,
    WindDirection,
    TimestampMs,
    CreatedAtMs,
}

/// Holes table - per-hole scoring summaries, separate from the shots on them
#[derive(Iden)]
pub enum Holes {
    Table,
    HoleId,
    RoundId,
    HoleNumber,
    Score,
    Par,
    FairwayHit,
    GreenInRegulation,
    Putts,
    Notes,
    CreatedAtMs,
}
