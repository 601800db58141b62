//! Compatibility analyses consumed by the compatibility pipeline.
//!
//! The pipeline only cares about call gating and failure containment; the
//! analyses themselves sit behind [`CompatibilityEngine`] so alternative
//! implementations can be swapped in.

mod cycles;
mod engine;
mod types;
mod zodiac;

use anyhow::Result;

use crate::profile::{AstrologyProfile, SajuProfile};

pub use engine::HarmonyEngine;
pub use types::{CrossSystemAnalysis, Insight, SajuAnalysis, Synastry};

pub trait CompatibilityEngine: Send + Sync {
    fn saju_analysis(&self, a: &SajuProfile, b: &SajuProfile) -> Result<SajuAnalysis>;
    fn ten_gods(&self, a: &SajuProfile, b: &SajuProfile) -> Result<Insight>;
    fn shinsals(&self, a: &SajuProfile, b: &SajuProfile) -> Result<Insight>;
    fn harmonies(&self, a: &SajuProfile, b: &SajuProfile) -> Result<Insight>;
    fn clashes(&self, a: &SajuProfile, b: &SajuProfile) -> Result<Insight>;
    fn yongsin(&self, a: &SajuProfile, b: &SajuProfile) -> Result<Insight>;
    fn gongmang(&self, a: &SajuProfile, b: &SajuProfile) -> Result<Insight>;
    fn gyeokguk(&self, a: &SajuProfile, b: &SajuProfile) -> Result<Insight>;
    fn element_balance(&self, a: &SajuProfile, b: &SajuProfile) -> Result<Insight>;
    fn pillar_resonance(&self, a: &SajuProfile, b: &SajuProfile) -> Result<Insight>;

    fn synastry(&self, a: &AstrologyProfile, b: &AstrologyProfile) -> Result<Synastry>;
    fn aspects(&self, a: &AstrologyProfile, b: &AstrologyProfile) -> Result<Insight>;
    fn composite(&self, a: &AstrologyProfile, b: &AstrologyProfile) -> Result<Insight>;
    fn venus_mars(&self, a: &AstrologyProfile, b: &AstrologyProfile) -> Result<Insight>;

    fn mercury(&self, a: &AstrologyProfile, b: &AstrologyProfile) -> Result<Insight>;
    fn jupiter(&self, a: &AstrologyProfile, b: &AstrologyProfile) -> Result<Insight>;
    fn saturn(&self, a: &AstrologyProfile, b: &AstrologyProfile) -> Result<Insight>;
    fn outer_planets(&self, a: &AstrologyProfile, b: &AstrologyProfile) -> Result<Insight>;
    fn nodes(&self, a: &AstrologyProfile, b: &AstrologyProfile) -> Result<Insight>;

    fn cross_system(
        &self,
        saju_a: &SajuProfile,
        saju_b: &SajuProfile,
        astro_a: &AstrologyProfile,
        astro_b: &AstrologyProfile,
    ) -> Result<CrossSystemAnalysis>;
}
