// Library surface for the CLI, headless drivers and integration tests.
pub mod coach;
pub mod config;
pub mod error;
pub mod history;
pub mod metrics;
pub mod random;
pub mod runtime;
pub mod session;
pub mod simulator;

pub use coach::{Benchmark, Coach, CoachingReport, Mood, ResilientCoach};
pub use error::{CoachError, HistoryError, TrackerError};
pub use random::{SeededRandom, TelemetryRng, ThreadRandom};
pub use session::{Lap, SessionId, SessionSummary, SwimStyle};
pub use simulator::{SimulationState, Simulator};
