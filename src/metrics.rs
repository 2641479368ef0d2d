use crate::coach::Benchmark;
use crate::session::{Lap, SessionSummary};
use crate::simulator::LAP_DISTANCE_METERS;

pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Population standard deviation
pub fn std_dev(data: &[f64]) -> Option<f64> {
    let data_mean = mean(data)?;
    let variance = data
        .iter()
        .map(|value| {
            let diff = data_mean - *value;
            diff * diff
        })
        .sum::<f64>()
        / data.len() as f64;

    Some(variance.sqrt())
}

/// Mean SWOLF across laps, rounded to the nearest whole score
pub fn average_swolf(laps: &[Lap]) -> Option<u32> {
    let scores: Vec<f64> = laps.iter().map(|l| l.swolf as f64).collect();
    mean(&scores).map(|m| m.round() as u32)
}

pub fn stroke_count_std_dev(laps: &[Lap]) -> Option<f64> {
    let counts: Vec<f64> = laps.iter().map(|l| l.stroke_count as f64).collect();
    std_dev(&counts)
}

/// Time per 50m derived from total time and distance; `None` before any
/// distance has been covered
pub fn average_lap_time_50m(summary: &SessionSummary) -> Option<f64> {
    if summary.total_distance_meters == 0 {
        return None;
    }
    let splits = summary.total_distance_meters as f64 / LAP_DISTANCE_METERS as f64;
    Some(summary.total_time_seconds as f64 / splits)
}

/// Time per completed lap. A session with no laps counts as one.
pub fn average_lap_time(summary: &SessionSummary) -> f64 {
    summary.total_time_seconds as f64 / summary.laps.len().max(1) as f64
}

/// Seconds per 100m
pub fn pace_per_100m(summary: &SessionSummary) -> Option<f64> {
    if summary.total_distance_meters == 0 {
        return None;
    }
    Some(summary.total_time_seconds as f64 * 100.0 / summary.total_distance_meters as f64)
}

/// Seconds the swimmer's average lap trails the benchmark's 50m pace.
/// Negative means faster than the benchmark.
pub fn benchmark_gap(summary: &SessionSummary, benchmark: &Benchmark) -> f64 {
    average_lap_time(summary) - benchmark.avg_lap_time_50m
}

/// Signed gap display: `+14.0s` when slower, `-2.5s` when faster
pub fn format_gap(secs: f64) -> String {
    let sign = if secs > 0.0 { "+" } else { "" };
    format!("{}{:.1}s", sign, secs)
}

/// Watch-face clock: `MM:SS`, minutes keep counting past an hour
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// `M:SS` pace display, e.g. `1:45`
pub fn format_pace(secs: f64) -> String {
    let whole = secs.round() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}
