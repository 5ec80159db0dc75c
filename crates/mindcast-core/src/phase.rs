//! Phase classification for cycle signal values.
//!
//! A signal value is mapped to one of six ordinal bands. A critical day
//! always yields [`PhaseBand::Critical`], whatever the magnitude. Every
//! (cycle, band) pair has exactly one canonical recommendation string,
//! held in a static lookup table.
//!
//! Thresholds (first match wins):
//! - critical flag set → Critical
//! - `value >= 0.6` → StrongPositive
//! - `value >= 0.2` → MildPositive
//! - `value > -0.2` → Neutral
//! - `value > -0.6` → MildNegative
//! - otherwise → StrongNegative

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cycle::Cycle;

pub const STRONG_POSITIVE_MIN: f64 = 0.6;
pub const MILD_POSITIVE_MIN: f64 = 0.2;
pub const NEUTRAL_LOWER: f64 = -0.2;
pub const MILD_NEGATIVE_LOWER: f64 = -0.6;

/// Ordinal phase of a cycle on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseBand {
    /// Transition day (zero crossing or near zero)
    Critical,
    StrongPositive,
    MildPositive,
    Neutral,
    MildNegative,
    StrongNegative,
}

impl PhaseBand {
    /// All bands in table order.
    pub const ALL: [PhaseBand; 6] = [
        PhaseBand::Critical,
        PhaseBand::StrongPositive,
        PhaseBand::MildPositive,
        PhaseBand::Neutral,
        PhaseBand::MildNegative,
        PhaseBand::StrongNegative,
    ];

    /// Value-based band, ignoring criticality.
    ///
    /// Total over all floats; NaN lands in `StrongNegative`.
    pub fn from_value(value: f64) -> Self {
        if value >= STRONG_POSITIVE_MIN {
            PhaseBand::StrongPositive
        } else if value >= MILD_POSITIVE_MIN {
            PhaseBand::MildPositive
        } else if value > NEUTRAL_LOWER {
            PhaseBand::Neutral
        } else if value > MILD_NEGATIVE_LOWER {
            PhaseBand::MildNegative
        } else {
            PhaseBand::StrongNegative
        }
    }

    pub fn index(self) -> usize {
        match self {
            PhaseBand::Critical => 0,
            PhaseBand::StrongPositive => 1,
            PhaseBand::MildPositive => 2,
            PhaseBand::Neutral => 3,
            PhaseBand::MildNegative => 4,
            PhaseBand::StrongNegative => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PhaseBand::Critical => "Critical",
            PhaseBand::StrongPositive => "Strong positive",
            PhaseBand::MildPositive => "Mild positive",
            PhaseBand::Neutral => "Neutral",
            PhaseBand::MildNegative => "Mild negative",
            PhaseBand::StrongNegative => "Strong negative",
        }
    }
}

impl fmt::Display for PhaseBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// Rows follow `Cycle::index`, columns follow `PhaseBand::index`.
const RECOMMENDATIONS: [[&str; 6]; 3] = [
    [
        "Transition day for the body: keep training light, warm up longer and double-check anything physically risky.",
        "Energy is high: a good day for interval training or a demanding workout. Drink plenty of water.",
        "Steady energy: keep your regular exercise routine at a sustainable pace.",
        "Balanced energy: light movement such as yoga or a brisk walk keeps the rhythm.",
        "Energy is dipping: favour stretching and walks, and try to get 30 minutes more sleep.",
        "Low physical reserve: make rest the priority and skip heavy training today.",
    ],
    [
        "Emotionally unsettled day: pause before reacting, keep messages short and take a few minutes for breathing or journaling.",
        "Empathy is strong: a good day for presentations, counselling or collaborative meetings.",
        "Stable mood: routine teamwork and exchanging feedback should go smoothly.",
        "Neutral mood: stick to your routine and check in with yourself, small triggers may sway you.",
        "Mood may dip: keep conversations brief and leave important talks for another day.",
        "Emotional reserve is low: avoid conflict and negotiations, and make time to rest.",
    ],
    [
        "Mental transition day: double-check figures and documents, and postpone irreversible decisions.",
        "Sharp thinking: tackle hard analysis, maths or coding in your most focused hours.",
        "Good focus: work through planned tasks in steady blocks and review as you go.",
        "Moderate focus: suited to organising notes, reviewing and lightly exploring new material.",
        "Focus is softer: switch to summarising, memorising and short timed sessions.",
        "Low mental sharpness: stick to simple tasks and leave complex problems for later.",
    ],
];

/// Canonical recommendation for a (cycle, band) pair.
pub fn recommendation(cycle: Cycle, band: PhaseBand) -> &'static str {
    RECOMMENDATIONS[cycle.index()][band.index()]
}

/// Classify a signal value for `cycle`.
///
/// `is_critical` overrides the value-based band.
pub fn classify(cycle: Cycle, value: f64, is_critical: bool) -> (PhaseBand, &'static str) {
    let band = if is_critical {
        PhaseBand::Critical
    } else {
        PhaseBand::from_value(value)
    };
    (band, recommendation(cycle, band))
}

/// Coarse label for a whole day, derived from the mean of the three
/// cycle values. Uses the same ladder as [`PhaseBand`] without the
/// critical override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallCondition {
    Excellent,
    Good,
    Steady,
    Subdued,
    Depleted,
}

impl OverallCondition {
    pub fn from_mean(mean: f64) -> Self {
        match PhaseBand::from_value(mean) {
            PhaseBand::StrongPositive => OverallCondition::Excellent,
            PhaseBand::MildPositive => OverallCondition::Good,
            PhaseBand::Neutral => OverallCondition::Steady,
            PhaseBand::MildNegative => OverallCondition::Subdued,
            PhaseBand::StrongNegative | PhaseBand::Critical => OverallCondition::Depleted,
        }
    }

    /// Condition for a set of values. An empty set counts as a mean of 0.
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::from_mean(0.0);
        }
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        Self::from_mean(mean)
    }

    pub fn label(self) -> &'static str {
        match self {
            OverallCondition::Excellent => "Excellent",
            OverallCondition::Good => "Good",
            OverallCondition::Steady => "Steady",
            OverallCondition::Subdued => "Subdued",
            OverallCondition::Depleted => "Depleted",
        }
    }
}

impl fmt::Display for OverallCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
