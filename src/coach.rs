use crate::error::CoachError;
use crate::metrics::{average_lap_time_50m, average_swolf};
use crate::session::{SessionSummary, SwimStyle};
use clap::ValueEnum;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

pub const FALLBACK_ANALYSIS: &str = "Unable to generate analysis at this time.";
pub const FALLBACK_TIPS: [&str; 3] = [
    "Focus on consistency.",
    "Maintain a steady breathing rhythm.",
    "Keep your core engaged.",
];
pub const FALLBACK_NOTE_FEEDBACK: &str = "Great effort today. Focus on recovery.";
pub const EMPTY_NOTE_FEEDBACK: &str = "Rest well and hydrate!";

/// Reference performance profile a session is compared against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Benchmark {
    pub swimmer_name: String,
    pub style: SwimStyle,
    pub avg_lap_time_50m: f64,
    /// strokes per minute
    pub avg_stroke_rate: f64,
    #[serde(default)]
    pub description: String,
}

/// Self-reported mood attached to a journal note
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, strum_macros::Display,
)]
pub enum Mood {
    Great,
    Good,
    Tired,
    Exhausted,
    Injured,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachingReport {
    pub analysis: String,
    #[serde(default)]
    pub tips: Vec<String>,
}

impl CoachingReport {
    pub fn fallback() -> Self {
        Self {
            analysis: FALLBACK_ANALYSIS.to_string(),
            tips: FALLBACK_TIPS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

pub trait Coach {
    fn analyze(
        &self,
        summary: &SessionSummary,
        benchmark: &Benchmark,
    ) -> Result<CoachingReport, CoachError>;

    fn analyze_note(&self, note: &str, mood: Mood) -> Result<String, CoachError>;
}

/// Prompt-in, text-out access to a language model
pub trait TextModel {
    /// `json` asks the model to answer with a `{analysis, tips}` object.
    fn complete(&self, prompt: &str, json: bool) -> Result<String, CoachError>;
}

/// Stand-in used when no model transport is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineModel;

impl TextModel for OfflineModel {
    fn complete(&self, _prompt: &str, _json: bool) -> Result<String, CoachError> {
        Err(CoachError::Unavailable)
    }
}

pub fn performance_prompt(summary: &SessionSummary, benchmark: &Benchmark) -> String {
    let lap_time = average_lap_time_50m(summary)
        .map_or_else(|| "n/a".to_string(), |t| format!("{:.2}s", t));
    let swolf = average_swolf(&summary.laps).map_or_else(|| "n/a".to_string(), |s| s.to_string());

    format!(
        "You are an Olympic swimming coach. Compare this swim session with the professional benchmark.\n\
         \n\
         Session:\n\
         - Style: {}\n\
         - Total distance: {}m\n\
         - Average heart rate: {} bpm\n\
         - Average 50m lap time: {}\n\
         - Average SWOLF: {}\n\
         \n\
         Benchmark ({}):\n\
         - Average 50m pace: {}s\n\
         - Average stroke rate: {} strokes/min\n\
         \n\
         Reply with a short paragraph on the performance gap and three actionable technique tips to close it.",
        summary.style,
        summary.total_distance_meters,
        summary.average_heart_rate_bpm,
        lap_time,
        swolf,
        benchmark.swimmer_name,
        benchmark.avg_lap_time_50m,
        benchmark.avg_stroke_rate,
    )
}

pub fn journal_prompt(note: &str, mood: Mood) -> String {
    format!(
        "A swimmer has just finished practice.\n\
         Mood: {}\n\
         Journal note: \"{}\"\n\
         \n\
         Give one brief, encouraging, scientifically sound recovery or mental performance tip (two sentences at most).",
        mood,
        note.trim()
    )
}

/// Decode the model's structured `{analysis, tips}` answer
pub fn parse_report(text: &str) -> Result<CoachingReport, CoachError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CoachError::EmptyResponse);
    }
    Ok(serde_json::from_str(trimmed)?)
}

/// [`Coach`] over a raw [`TextModel`]
#[derive(Debug, Clone, Default)]
pub struct ModelCoach<M: TextModel> {
    model: M,
}

impl<M: TextModel> ModelCoach<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }
}

impl<M: TextModel> Coach for ModelCoach<M> {
    fn analyze(
        &self,
        summary: &SessionSummary,
        benchmark: &Benchmark,
    ) -> Result<CoachingReport, CoachError> {
        let reply = self
            .model
            .complete(&performance_prompt(summary, benchmark), true)?;
        parse_report(&reply)
    }

    fn analyze_note(&self, note: &str, mood: Mood) -> Result<String, CoachError> {
        self.model.complete(&journal_prompt(note, mood), false)
    }
}

/// Never-failing front for a [`Coach`]
#[derive(Debug, Clone, Default)]
pub struct ResilientCoach<C: Coach> {
    inner: C,
}

impl<C: Coach> ResilientCoach<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    pub fn analyze(&self, summary: &SessionSummary, benchmark: &Benchmark) -> CoachingReport {
        match self.inner.analyze(summary, benchmark) {
            Ok(report) => report,
            Err(e) => {
                log::warn!("coaching analysis failed for session {}: {}", summary.id, e);
                CoachingReport::fallback()
            }
        }
    }

    pub fn analyze_note(&self, note: &str, mood: Mood) -> String {
        match self.inner.analyze_note(note, mood) {
            Ok(reply) if !reply.trim().is_empty() => reply,
            Ok(_) => EMPTY_NOTE_FEEDBACK.to_string(),
            Err(e) => {
                log::warn!("journal feedback failed: {}", e);
                FALLBACK_NOTE_FEEDBACK.to_string()
            }
        }
    }
}

/// Plain-text rendering used by the CLI report
pub fn render_report(report: &CoachingReport) -> String {
    let tips = report
        .tips
        .iter()
        .enumerate()
        .map(|(i, tip)| format!("  {}. {}", i + 1, tip))
        .join("\n");

    if tips.is_empty() {
        report.analysis.clone()
    } else {
        format!("{}\n{}", report.analysis, tips)
    }
}
