use anyhow::Result;
use serde::Serialize;
use tracing::error;

use crate::{
    analysis::{CompatibilityEngine, CrossSystemAnalysis, Insight, SajuAnalysis, Synastry},
    profile::{AstrologyProfile, Point, SajuProfile},
};

/// Outputs of the Saju-side analyses. Either all are present or none are.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SajuInsights {
    pub saju_analysis: Option<SajuAnalysis>,
    pub ten_gods: Option<Insight>,
    pub shinsals: Option<Insight>,
    pub harmonies: Option<Insight>,
    pub clashes: Option<Insight>,
    pub yongsin: Option<Insight>,
    pub gongmang: Option<Insight>,
    pub gyeokguk: Option<Insight>,
    pub element_balance: Option<Insight>,
    pub pillar_resonance: Option<Insight>,
}

/// Outputs of the astrology-side analyses. Extended entries are gated per point.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AstroInsights {
    pub synastry: Option<Synastry>,
    pub aspects: Option<Insight>,
    pub composite: Option<Insight>,
    pub venus_mars: Option<Insight>,
    pub mercury: Option<Insight>,
    pub jupiter: Option<Insight>,
    pub saturn: Option<Insight>,
    pub outer_planets: Option<Insight>,
    pub nodes: Option<Insight>,
}

/// Run every Saju analysis when both profiles exist. One failure discards the whole block.
pub fn run_saju_analyses(
    engine: &dyn CompatibilityEngine,
    a: Option<&SajuProfile>,
    b: Option<&SajuProfile>,
) -> SajuInsights {
    let (Some(a), Some(b)) = (a, b) else {
        return SajuInsights::default();
    };

    match collect_saju(engine, a, b) {
        Ok(insights) => insights,
        Err(err) => {
            error!(?err, "saju compatibility analysis failed");
            SajuInsights::default()
        }
    }
}

fn collect_saju(
    engine: &dyn CompatibilityEngine,
    a: &SajuProfile,
    b: &SajuProfile,
) -> Result<SajuInsights> {
    Ok(SajuInsights {
        saju_analysis: Some(engine.saju_analysis(a, b)?),
        ten_gods: Some(engine.ten_gods(a, b)?),
        shinsals: Some(engine.shinsals(a, b)?),
        harmonies: Some(engine.harmonies(a, b)?),
        clashes: Some(engine.clashes(a, b)?),
        yongsin: Some(engine.yongsin(a, b)?),
        gongmang: Some(engine.gongmang(a, b)?),
        gyeokguk: Some(engine.gyeokguk(a, b)?),
        element_balance: Some(engine.element_balance(a, b)?),
        pillar_resonance: Some(engine.pillar_resonance(a, b)?),
    })
}

/// Run the astrology analyses when both profiles exist. One failure discards the whole block.
pub fn run_astro_analyses(
    engine: &dyn CompatibilityEngine,
    a: Option<&AstrologyProfile>,
    b: Option<&AstrologyProfile>,
) -> AstroInsights {
    let (Some(a), Some(b)) = (a, b) else {
        return AstroInsights::default();
    };

    match collect_astro(engine, a, b) {
        Ok(insights) => insights,
        Err(err) => {
            error!(?err, "astrology compatibility analysis failed");
            AstroInsights::default()
        }
    }
}

fn collect_astro(
    engine: &dyn CompatibilityEngine,
    a: &AstrologyProfile,
    b: &AstrologyProfile,
) -> Result<AstroInsights> {
    let mut insights = AstroInsights {
        synastry: Some(engine.synastry(a, b)?),
        aspects: Some(engine.aspects(a, b)?),
        composite: Some(engine.composite(a, b)?),
        venus_mars: Some(engine.venus_mars(a, b)?),
        ..AstroInsights::default()
    };

    if both_have(a, b, &[Point::Mercury]) {
        insights.mercury = Some(engine.mercury(a, b)?);
    }
    if both_have(a, b, &[Point::Jupiter]) {
        insights.jupiter = Some(engine.jupiter(a, b)?);
    }
    if both_have(a, b, &[Point::Saturn]) {
        insights.saturn = Some(engine.saturn(a, b)?);
    }
    if both_have(a, b, &[Point::Uranus, Point::Neptune, Point::Pluto]) {
        insights.outer_planets = Some(engine.outer_planets(a, b)?);
    }
    if both_have(a, b, &[Point::NorthNode, Point::SouthNode]) {
        insights.nodes = Some(engine.nodes(a, b)?);
    }

    Ok(insights)
}

fn both_have(a: &AstrologyProfile, b: &AstrologyProfile, points: &[Point]) -> bool {
    points
        .iter()
        .all(|point| a.placement(*point).is_some() && b.placement(*point).is_some())
}

/// Run the cross-system analysis when all four profiles exist.
pub fn run_cross_system(
    engine: &dyn CompatibilityEngine,
    saju: (Option<&SajuProfile>, Option<&SajuProfile>),
    astro: (Option<&AstrologyProfile>, Option<&AstrologyProfile>),
) -> Option<CrossSystemAnalysis> {
    let ((Some(saju_a), Some(saju_b)), (Some(astro_a), Some(astro_b))) = (saju, astro) else {
        return None;
    };

    match engine.cross_system(saju_a, saju_b, astro_a, astro_b) {
        Ok(analysis) => Some(analysis),
        Err(err) => {
            error!(?err, "cross-system compatibility analysis failed");
            None
        }
    }
}
