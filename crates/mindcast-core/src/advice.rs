//! Daily advice derived from the three cycle values.
//!
//! Uses a coarser three-way tone than [`crate::phase::PhaseBand`]:
//! `>= 0.33` is high, `<= -0.33` is low, anything between is neutral.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cycle::Cycle;
use crate::day::DayAggregate;

pub const HIGH_TONE_MIN: f64 = 0.33;
pub const LOW_TONE_MAX: f64 = -0.33;

/// Three-way summary tone for a single cycle value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryTone {
    High,
    Neutral,
    Low,
}

impl SummaryTone {
    pub fn from_value(value: f64) -> Self {
        if value >= HIGH_TONE_MIN {
            SummaryTone::High
        } else if value <= LOW_TONE_MAX {
            SummaryTone::Low
        } else {
            SummaryTone::Neutral
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SummaryTone::High => "High",
            SummaryTone::Neutral => "Transitional",
            SummaryTone::Low => "Low",
        }
    }

    /// Status marker used in text summaries.
    pub fn marker(self) -> &'static str {
        match self {
            SummaryTone::High => "🟢",
            SummaryTone::Neutral => "⚪",
            SummaryTone::Low => "🔴",
        }
    }
}

impl fmt::Display for SummaryTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Two or three sentence commentary for a cycle in a given tone.
pub fn commentary(cycle: Cycle, tone: SummaryTone) -> &'static str {
    match (cycle, tone) {
        (Cycle::Physical, SummaryTone::High) => {
            "Energy is on the rise. Cardio with some light strength work suits today. \
             Drink more water to help recovery and avoid maximal loads."
        }
        (Cycle::Physical, SummaryTone::Neutral) => {
            "Wake the body up without pushing it. \
             Light intervals or yoga help keep the rhythm steady."
        }
        (Cycle::Physical, SummaryTone::Low) => {
            "Fatigue may be building up. Stick to stretching and walks, \
             and try to add 30 minutes of sleep tonight."
        }
        (Cycle::Emotional, SummaryTone::High) => {
            "Emotional balance and empathy are strong today. Presentations, counselling \
             and collaboration fit well, and feedback lands easily."
        }
        (Cycle::Emotional, SummaryTone::Neutral) => {
            "Your mood is fairly neutral. Small things may sway you, \
             so lean on routine and steady breathing."
        }
        (Cycle::Emotional, SummaryTone::Low) => {
            "Watch for mood swings. Push important conversations to tomorrow \
             and keep messages short and clear. Check in on how rested you feel."
        }
        (Cycle::Intellectual, SummaryTone::High) => {
            "Analysis and reasoning are sharp. Take on maths, science or coding in the \
             morning and save the afternoon for review."
        }
        (Cycle::Intellectual, SummaryTone::Neutral) => {
            "A good day for organising and reviewing. Spend time tidying the reasoning \
             and restructuring notes rather than chasing conclusions."
        }
        (Cycle::Intellectual, SummaryTone::Low) => {
            "Complex problems may feel slow. Switch to memorising, summarising and \
             reviewing mistakes, and leave important decisions for another day."
        }
    }
}

/// Summary line for one cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleSummary {
    pub cycle: Cycle,
    pub value: f64,
    pub tone: SummaryTone,
    pub commentary: String,
}

impl CycleSummary {
    pub fn new(cycle: Cycle, value: f64) -> Self {
        let tone = SummaryTone::from_value(value);
        Self {
            cycle,
            value,
            tone,
            commentary: commentary(cycle, tone).to_string(),
        }
    }

    /// e.g. `Physical (+0.72) 🟢`
    pub fn headline(&self) -> String {
        format!("{} ({:+.2}) {}", self.cycle, self.value, self.tone.marker())
    }
}

/// Actionable advice for a day, grouped by area of life.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyAdvice {
    /// Driven by the intellectual cycle
    pub study_work: Vec<String>,
    /// Driven by the emotional cycle
    pub social: Vec<String>,
    /// Driven by the physical cycle
    pub health_rest: Vec<String>,
    pub caution: Vec<String>,
}

impl DailyAdvice {
    /// Sections in display order with their titles.
    pub fn sections(&self) -> [(&'static str, &[String]); 4] {
        [
            ("Study / Work", self.study_work.as_slice()),
            ("Activity / Social", self.social.as_slice()),
            ("Health / Rest", self.health_rest.as_slice()),
            ("Caution", self.caution.as_slice()),
        ]
    }
}

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Build the day's advice from raw cycle values.
pub fn advise_today(physical: f64, emotional: f64, intellectual: f64) -> DailyAdvice {
    let study_work = match SummaryTone::from_value(intellectual) {
        SummaryTone::High => lines(&[
            "Prioritise subjects that need logic and analysis, such as maths, science, coding or problem sets. 🧠",
            "Focus peaks in the morning, so schedule the hardest task early.",
        ]),
        SummaryTone::Low => lines(&[
            "Switch to a routine of memorising, tidying up and summarising. Hard tasks can wait until tomorrow.",
            "Use a 25/5 timer to keep sessions short and focused.",
        ]),
        SummaryTone::Neutral => lines(&[
            "Handle medium-difficulty tasks first and spend time reviewing and proofreading.",
        ]),
    };

    let social = match SummaryTone::from_value(emotional) {
        SummaryTone::High => lines(&[
            "Good for presentations, discussions and counselling. Feel free to book collaborative meetings. 💬",
        ]),
        SummaryTone::Low => lines(&[
            "Conflict is more likely. Move important negotiations and emotional conversations to tomorrow.",
            "Keep chat messages concise and double-check before sending.",
        ]),
        SummaryTone::Neutral => lines(&[
            "Keep messages short and clear. Written communication works better than face-to-face today.",
        ]),
    };

    let health_rest = match SummaryTone::from_value(physical) {
        SummaryTone::High => lines(&[
            "Running or cycling plus some light strength work is a good fit. Stay hydrated! 🏃",
        ]),
        SummaryTone::Low => lines(&[
            "Avoid strenuous exercise and recover with stretching and walks.",
            "Switch screens off an hour before bed and look after your sleep hygiene.",
        ]),
        SummaryTone::Neutral => lines(&["Light intervals or yoga help regulate your rhythm."]),
    };

    let caution = if emotional <= LOW_TONE_MAX || intellectual <= LOW_TONE_MAX {
        lines(&[
            "Postponing big decisions, such as signing contracts or submitting applications, by a day is the safer choice. ⚠️",
        ])
    } else {
        lines(&["Don't overestimate your focus. Re-read important documents after a ten-minute break."])
    };

    DailyAdvice {
        study_work,
        social,
        health_rest,
        caution,
    }
}

/// Advice and per-cycle summaries for an aggregated day.
///
/// Tones are taken from the raw values at `day.elapsed_days`; the summaries
/// keep the rounded value for display.
pub fn advise_day(day: &DayAggregate) -> (DailyAdvice, Vec<CycleSummary>) {
    let raw = |cycle: Cycle| cycle.value_at(day.elapsed_days);
    let advice = advise_today(
        raw(Cycle::Physical),
        raw(Cycle::Emotional),
        raw(Cycle::Intellectual),
    );
    let summaries = day
        .rows
        .iter()
        .map(|row| {
            let tone = SummaryTone::from_value(raw(row.cycle));
            CycleSummary {
                cycle: row.cycle,
                value: row.value,
                tone,
                commentary: commentary(row.cycle, tone).to_string(),
            }
        })
        .collect();
    (advice, summaries)
}
