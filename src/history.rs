use crate::error::HistoryError;
use crate::metrics::average_swolf;
use crate::session::{SessionSummary, SwimStyle};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

/// One CSV row per finished session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionLogRow {
    pub id: String,
    pub finished_at: String,
    pub style: SwimStyle,
    pub distance_m: u32,
    pub time_s: u32,
    pub laps: usize,
    pub avg_hr: u32,
    pub calories: u32,
    pub avg_swolf: Option<u32>,
    pub target_m: Option<u32>,
}

impl From<&SessionSummary> for SessionLogRow {
    fn from(s: &SessionSummary) -> Self {
        Self {
            id: s.id.to_string(),
            finished_at: s.started_at.to_rfc3339(),
            style: s.style,
            distance_m: s.total_distance_meters,
            time_s: s.total_time_seconds,
            laps: s.lap_count(),
            avg_hr: s.average_heart_rate_bpm,
            calories: s.calories_burned,
            avg_swolf: average_swolf(&s.laps),
            target_m: s.target_distance_meters,
        }
    }
}

/// Append-only CSV log of finished sessions
#[derive(Debug, Clone)]
pub struct SessionLog {
    path: PathBuf,
}

impl SessionLog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, summary: &SessionSummary) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Only a brand new file gets the header row
        let needs_header = !self.path.exists();

        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer.serialize(SessionLogRow::from(summary))?;
        writer.flush()?;

        log::debug!("appended session {} to {}", summary.id, self.path.display());
        Ok(())
    }

    pub fn read_all(&self) -> Result<Vec<SessionLogRow>, HistoryError> {
        let mut reader = csv::Reader::from_path(&self.path)?;
        let rows = reader
            .deserialize()
            .collect::<Result<Vec<SessionLogRow>, csv::Error>>()?;
        Ok(rows)
    }
}
