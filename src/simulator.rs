use crate::random::TelemetryRng;
use crate::session::{Lap, SessionId, SessionSummary, SwimStyle};
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Wall-clock spacing between ticks
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Every simulated lap is a 35 second, 50m split
pub const LAP_TIME_SECONDS: u32 = 35;
pub const LAP_DISTANCE_METERS: u32 = 50;

/// Distance covered on each even-numbered tick (~1.5 m/s pace)
pub const DISTANCE_PER_STROKE_TICK: f64 = 1.5;

pub const INITIAL_HEART_RATE: f64 = 70.0;
pub const HR_FLOOR: f64 = 110.0;
pub const HR_CEILING: f64 = 185.0;

/// Heart-rate drift per update is drawn from `[HR_DRIFT_LOW, HR_DRIFT_HIGH)`.
/// The range is skewed upwards on purpose: effort builds over a session.
pub const HR_DRIFT_LOW: f64 = -1.5;
pub const HR_DRIFT_HIGH: f64 = 2.5;

pub const STROKE_COUNT_MIN: u32 = 25;
pub const STROKE_COUNT_MAX: u32 = 39;

pub const CALORIES_PER_SECOND: f64 = 0.15;

/// Mutable state of one in-progress session
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    pub elapsed_seconds: u32,
    pub distance_meters: f64,
    pub heart_rate_bpm: f64,
    pub laps: Vec<Lap>,
    pub target_distance_meters: Option<f64>,
}

impl SimulationState {
    /// Fresh state. Targets that are not strictly positive and finite are
    /// treated as an open swim.
    pub fn new(target_distance_meters: Option<f64>) -> Self {
        Self {
            elapsed_seconds: 0,
            distance_meters: 0.0,
            heart_rate_bpm: INITIAL_HEART_RATE,
            laps: Vec::new(),
            target_distance_meters: target_distance_meters.filter(|t| t.is_finite() && *t > 0.0),
        }
    }

    pub fn has_reached_target(&self) -> bool {
        self.target_distance_meters
            .is_some_and(|target| self.distance_meters >= target)
    }

    /// Mean of the recorded lap heart rates, floored.
    ///
    /// Falls back to the current reading when that mean is zero (including
    /// when no lap has completed), and to zero when the current reading
    /// truncates to zero as well.
    pub fn average_heart_rate(&self) -> u32 {
        let total: u64 = self.laps.iter().map(|l| l.heart_rate_bpm as u64).sum();
        let mean = total / self.laps.len().max(1) as u64;

        if mean != 0 {
            mean as u32
        } else {
            let current = self.heart_rate_bpm.floor();
            if current > 0.0 {
                current as u32
            } else {
                0
            }
        }
    }

    pub fn calories_burned(&self) -> u32 {
        (self.elapsed_seconds as f64 * CALORIES_PER_SECOND).floor() as u32
    }

    /// Consumes the state into the terminal summary record
    pub fn into_summary(self, style: SwimStyle, finished_at: DateTime<Utc>) -> SessionSummary {
        let average_heart_rate_bpm = self.average_heart_rate();
        let calories_burned = self.calories_burned();

        SessionSummary {
            id: SessionId::generate(),
            started_at: finished_at,
            style,
            total_distance_meters: self.distance_meters.floor() as u32,
            total_time_seconds: self.elapsed_seconds,
            calories_burned,
            laps: self.laps,
            average_heart_rate_bpm,
            target_distance_meters: self.target_distance_meters.map(|t| t as u32),
        }
    }
}

/// Drives the simulated telemetry of one session
#[derive(Debug)]
pub struct Simulator<R: TelemetryRng> {
    style: SwimStyle,
    state: SimulationState,
    rng: R,
}

impl<R: TelemetryRng> Simulator<R> {
    pub fn start(style: SwimStyle, target_distance_meters: Option<f64>, rng: R) -> Self {
        let state = SimulationState::new(target_distance_meters);
        log::debug!(
            "starting {} session (target: {:?})",
            style,
            state.target_distance_meters
        );

        Self { style, state, rng }
    }

    /// Advance one second of simulated swimming.
    ///
    /// Returns the lap completed on this tick, if any.
    pub fn on_tick(&mut self) -> Option<Lap> {
        self.state.elapsed_seconds += 1;
        let elapsed = self.state.elapsed_seconds;
        let reached_target = self.state.has_reached_target();

        if elapsed % 2 == 0 {
            if !reached_target {
                self.state.distance_meters += DISTANCE_PER_STROKE_TICK;
            }
            let drift = self.rng.uniform_real(HR_DRIFT_LOW, HR_DRIFT_HIGH);
            self.state.heart_rate_bpm = (self.state.heart_rate_bpm + drift).clamp(HR_FLOOR, HR_CEILING);
        }

        if elapsed > 0 && elapsed % LAP_TIME_SECONDS == 0 && !reached_target {
            let stroke_count = self.rng.uniform_int(STROKE_COUNT_MIN, STROKE_COUNT_MAX);
            let lap = Lap::new(
                self.state.laps.len() as u32 + 1,
                LAP_TIME_SECONDS,
                stroke_count,
                self.state.heart_rate_bpm as u32,
            );
            log::debug!(
                "lap {} complete: {} strokes, {} bpm, swolf {}",
                lap.lap_number,
                lap.stroke_count,
                lap.heart_rate_bpm,
                lap.swolf
            );
            self.state.laps.push(lap);
            return Some(lap);
        }

        None
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn style(&self) -> SwimStyle {
        self.style
    }

    pub fn has_reached_target(&self) -> bool {
        self.state.has_reached_target()
    }

    /// Finish the session, stamping the summary with the current time
    pub fn stop(self) -> SessionSummary {
        self.stop_at(Utc::now())
    }

    pub fn stop_at(self, finished_at: DateTime<Utc>) -> SessionSummary {
        let summary = self.state.into_summary(self.style, finished_at);
        log::info!(
            "session {} finished: {}m in {}s over {} laps",
            summary.id,
            summary.total_distance_meters,
            summary.total_time_seconds,
            summary.laps.len()
        );
        summary
    }
}
