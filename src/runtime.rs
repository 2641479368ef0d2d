use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use crate::error::TrackerError;
use crate::random::TelemetryRng;
use crate::session::{Lap, SessionSummary, SwimStyle};
use crate::simulator::{SimulationState, Simulator, TICK_INTERVAL};

/// Event consumed by the session loop
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    Tick,
    Stop,
}

/// Source of control events (stop requests)
pub trait SessionEventSource {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<SessionEvent, RecvTimeoutError>;
}

/// Event source fed through an mpsc channel
pub struct ChannelEventSource {
    rx: Receiver<SessionEvent>,
}

impl ChannelEventSource {
    pub fn new(rx: Receiver<SessionEvent>) -> Self {
        Self { rx }
    }

    /// New source plus the sender used to request a stop
    pub fn pair() -> (Sender<SessionEvent>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, Self { rx })
    }
}

impl SessionEventSource for ChannelEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<SessionEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for FixedTicker {
    fn default() -> Self {
        Self::new(TICK_INTERVAL)
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Advances the session one event/tick at a time
pub struct Runner<E: SessionEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: SessionEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks up to tick interval and returns the next event, or Tick on timeout.
    /// Once every sender is gone nobody can ask for a stop, so that reads as `Stop`.
    pub fn step(&self) -> SessionEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => SessionEvent::Tick,
            Err(RecvTimeoutError::Disconnected) => SessionEvent::Stop,
        }
    }
}

/// Callbacks invoked while a session is driven.
///
/// Defaults are no-ops; implementors override what they need.
pub trait SessionObserver {
    fn on_tick(&mut self, _state: &SimulationState) {}

    fn on_lap(&mut self, _lap: &Lap) {}
}

pub struct NoopObserver;

impl SessionObserver for NoopObserver {}

/// Owns at most one active simulator
#[derive(Debug)]
pub struct Tracker<R: TelemetryRng> {
    active: Option<Simulator<R>>,
}

impl<R: TelemetryRng> Default for Tracker<R> {
    fn default() -> Self {
        Self { active: None }
    }
}

impl<R: TelemetryRng> Tracker<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a session. A second start while one is running is rejected and
    /// the running session is left untouched.
    pub fn start(
        &mut self,
        style: SwimStyle,
        target_distance_meters: Option<f64>,
        rng: R,
    ) -> Result<(), TrackerError> {
        if self.active.is_some() {
            return Err(TrackerError::SessionActive);
        }
        self.active = Some(Simulator::start(style, target_distance_meters, rng));
        Ok(())
    }

    pub fn tick(&mut self) -> Result<Option<Lap>, TrackerError> {
        let sim = self.active.as_mut().ok_or(TrackerError::NoActiveSession)?;
        Ok(sim.on_tick())
    }

    /// Ends the active session. The simulator is taken out of the tracker
    /// before it is summarized, so later ticks are refused.
    pub fn stop(&mut self) -> Result<SessionSummary, TrackerError> {
        let sim = self.active.take().ok_or(TrackerError::NoActiveSession)?;
        Ok(sim.stop())
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn state(&self) -> Option<&SimulationState> {
        self.active.as_ref().map(|sim| sim.state())
    }
}

/// Drive the tracker's active session until a `Stop` event arrives or the
/// event source disconnects.
///
/// `max_ticks` bounds the run; reaching it stops the session as if `Stop`
/// had been received.
pub fn drive<E, T, R, O>(
    runner: &Runner<E, T>,
    tracker: &mut Tracker<R>,
    observer: &mut O,
    max_ticks: Option<u32>,
) -> Result<SessionSummary, TrackerError>
where
    E: SessionEventSource,
    T: Ticker,
    R: TelemetryRng,
    O: SessionObserver,
{
    let mut ticks = 0u32;

    loop {
        if max_ticks.is_some_and(|max| ticks >= max) {
            break;
        }

        match runner.step() {
            SessionEvent::Stop => break,
            SessionEvent::Tick => {
                if let Some(lap) = tracker.tick()? {
                    observer.on_lap(&lap);
                }
                if let Some(state) = tracker.state() {
                    observer.on_tick(state);
                }
                ticks += 1;
            }
        }
    }

    tracker.stop()
}
