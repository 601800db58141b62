use serde::Serialize;

/// Score assumed for any component whose analysis is absent.
pub const FALLBACK_SCORE: f64 = 65.0;

const SAJU_WEIGHT: f64 = 0.35;
const ASTRO_WEIGHT: f64 = 0.35;
const CROSS_WEIGHT: f64 = 0.30;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scores {
    pub saju_score: f64,
    pub astro_score: f64,
    pub cross_score: f64,
    pub overall_score: i64,
}

/// Weighted average of the three component scores, rounded once at the end.
pub fn aggregate(saju: Option<f64>, astro: Option<f64>, cross: Option<f64>) -> Scores {
    let saju_score = saju.unwrap_or(FALLBACK_SCORE);
    let astro_score = astro.unwrap_or(FALLBACK_SCORE);
    let cross_score = cross.unwrap_or(FALLBACK_SCORE);

    let weighted = saju_score * SAJU_WEIGHT + astro_score * ASTRO_WEIGHT + cross_score * CROSS_WEIGHT;

    Scores {
        saju_score,
        astro_score,
        cross_score,
        overall_score: weighted.round() as i64,
    }
}
