use serde::{Deserialize, Serialize};

/// Generic outcome of a single compatibility analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub score: u8,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<String>,
}

impl Insight {
    pub fn new(score: f64, summary: impl Into<String>) -> Self {
        Self {
            score: clamp_score(score),
            summary: summary.into(),
            highlights: Vec::new(),
        }
    }

    pub fn with_highlights(mut self, highlights: Vec<String>) -> Self {
        self.highlights = highlights;
        self
    }
}

/// Comprehensive Saju comparison. `overall_score` feeds the aggregate score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SajuAnalysis {
    pub overall_score: Option<f64>,
    pub day_master_relation: String,
    pub summary: String,
}

/// Sun/moon/venus/mars synastry. `compatibility_index` feeds the aggregate score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Synastry {
    pub compatibility_index: Option<f64>,
    pub sun_harmony: u8,
    pub moon_harmony: u8,
    pub love_harmony: u8,
    pub summary: String,
}

/// Saju against astrology across both people. `cross_system_score` feeds the aggregate score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossSystemAnalysis {
    pub cross_system_score: Option<f64>,
    pub resonances: Vec<String>,
    pub summary: String,
}

pub(crate) fn clamp_score(score: f64) -> u8 {
    if score.is_nan() {
        return 0;
    }
    score.round().clamp(0.0, 100.0) as u8
}
