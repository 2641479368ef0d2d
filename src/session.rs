use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stroke discipline a session is swum in
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
pub enum SwimStyle {
    #[default]
    Freestyle,
    Butterfly,
    Breaststroke,
    Backstroke,
    #[serde(rename = "Individual Medley")]
    #[strum(serialize = "Individual Medley")]
    IndividualMedley,
}

/// One completed 50m split. Never mutated after it is appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lap {
    pub lap_number: u32,
    pub time_seconds: u32,
    pub stroke_count: u32,
    pub heart_rate_bpm: u32,
    pub swolf: u32,
}

impl Lap {
    /// Builds a lap with its SWOLF score frozen as `time + strokes`.
    pub fn new(lap_number: u32, time_seconds: u32, stroke_count: u32, heart_rate_bpm: u32) -> Self {
        Self {
            lap_number,
            time_seconds,
            stroke_count,
            heart_rate_bpm,
            swolf: time_seconds + stroke_count,
        }
    }
}

/// Random v4 identifier of a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Immutable record produced when a simulated session is stopped.
///
/// `started_at` carries the moment the session was *finalized*, not the
/// moment the first tick fired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: SessionId,
    pub started_at: DateTime<Utc>,
    pub style: SwimStyle,
    pub total_distance_meters: u32,
    pub total_time_seconds: u32,
    pub calories_burned: u32,
    pub laps: Vec<Lap>,
    pub average_heart_rate_bpm: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_distance_meters: Option<u32>,
}

impl SessionSummary {
    pub fn lap_count(&self) -> usize {
        self.laps.len()
    }
}
