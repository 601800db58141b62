//! Two-person compatibility: profile normalization, guarded analysis calls and
//! the weighted overall score.

mod invoke;
mod memo;
mod score;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    analysis::{CompatibilityEngine, CrossSystemAnalysis},
    locale::Locale,
    profile::{AstrologyProfile, SajuProfile, build_astro_profile, build_saju_profile},
};

pub use invoke::{AstroInsights, SajuInsights, run_astro_analyses, run_cross_system, run_saju_analyses};
pub use memo::CompatibilityMemo;
pub use score::{Scores, aggregate};

/// Raw chart records for one person, as produced by the chart calculators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub saju: Option<Value>,
    #[serde(default, alias = "astrology")]
    pub astro: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompatibilityResult {
    pub locale: Locale,
    pub persons: Vec<PersonInput>,
    pub saju_profiles: [Option<SajuProfile>; 2],
    pub astro_profiles: [Option<AstrologyProfile>; 2],
    #[serde(flatten)]
    pub saju: SajuInsights,
    #[serde(flatten)]
    pub astro: AstroInsights,
    pub cross_system_analysis: Option<CrossSystemAnalysis>,
    #[serde(flatten)]
    pub scores: Scores,
    pub headline: String,
}

/// Run the full pipeline for the first two persons. Never fails: missing or
/// broken inputs only leave sections absent and scores at their fallback.
pub fn compute_compatibility(
    engine: &dyn CompatibilityEngine,
    persons: Vec<PersonInput>,
    locale: Locale,
) -> CompatibilityResult {
    let saju_profiles =
        [0, 1].map(|idx| build_saju_profile(persons.get(idx).and_then(|p| p.saju.as_ref())));
    let astro_profiles =
        [0, 1].map(|idx| build_astro_profile(persons.get(idx).and_then(|p| p.astro.as_ref())));

    let [saju_a, saju_b] = &saju_profiles;
    let [astro_a, astro_b] = &astro_profiles;

    let saju = run_saju_analyses(engine, saju_a.as_ref(), saju_b.as_ref());
    let astro = run_astro_analyses(engine, astro_a.as_ref(), astro_b.as_ref());
    let cross_system_analysis = run_cross_system(
        engine,
        (saju_a.as_ref(), saju_b.as_ref()),
        (astro_a.as_ref(), astro_b.as_ref()),
    );

    let scores = aggregate(
        saju.saju_analysis
            .as_ref()
            .and_then(|analysis| analysis.overall_score),
        astro
            .synastry
            .as_ref()
            .and_then(|synastry| synastry.compatibility_index),
        cross_system_analysis
            .as_ref()
            .and_then(|analysis| analysis.cross_system_score),
    );

    CompatibilityResult {
        locale,
        headline: headline(scores.overall_score, locale).to_string(),
        persons,
        saju_profiles,
        astro_profiles,
        saju,
        astro,
        cross_system_analysis,
        scores,
    }
}

fn headline(overall: i64, locale: Locale) -> &'static str {
    match overall {
        85.. => locale.pick(
            "A rare match: both charts pull in the same direction.",
            "보기 드문 인연: 두 사람의 기운이 같은 방향을 향합니다.",
        ),
        70..=84 => locale.pick(
            "A warm match with plenty of natural support.",
            "서로를 자연스럽게 돕는 따뜻한 궁합입니다.",
        ),
        55..=69 => locale.pick(
            "A balanced match that grows with understanding.",
            "이해가 깊어질수록 성장하는 균형 잡힌 궁합입니다.",
        ),
        _ => locale.pick(
            "A challenging match that asks for patience.",
            "인내가 필요한 도전적인 궁합입니다.",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::score::FALLBACK_SCORE;
    use crate::analysis::{HarmonyEngine, Insight, SajuAnalysis, Synastry};
    use anyhow::{Result, bail};
    use serde_json::json;

    /// Delegates to the default engine but fails the named analysis.
    struct FailingEngine {
        fail: &'static str,
    }

    impl FailingEngine {
        fn check(&self, name: &str) -> Result<()> {
            if self.fail == name {
                bail!("{name} exploded");
            }
            Ok(())
        }
    }

    impl CompatibilityEngine for FailingEngine {
        fn saju_analysis(&self, a: &SajuProfile, b: &SajuProfile) -> Result<SajuAnalysis> {
            self.check("saju_analysis")?;
            HarmonyEngine.saju_analysis(a, b)
        }
        fn ten_gods(&self, a: &SajuProfile, b: &SajuProfile) -> Result<Insight> {
            self.check("ten_gods")?;
            HarmonyEngine.ten_gods(a, b)
        }
        fn shinsals(&self, a: &SajuProfile, b: &SajuProfile) -> Result<Insight> {
            self.check("shinsals")?;
            HarmonyEngine.shinsals(a, b)
        }
        fn harmonies(&self, a: &SajuProfile, b: &SajuProfile) -> Result<Insight> {
            self.check("harmonies")?;
            HarmonyEngine.harmonies(a, b)
        }
        fn clashes(&self, a: &SajuProfile, b: &SajuProfile) -> Result<Insight> {
            self.check("clashes")?;
            HarmonyEngine.clashes(a, b)
        }
        fn yongsin(&self, a: &SajuProfile, b: &SajuProfile) -> Result<Insight> {
            self.check("yongsin")?;
            HarmonyEngine.yongsin(a, b)
        }
        fn gongmang(&self, a: &SajuProfile, b: &SajuProfile) -> Result<Insight> {
            self.check("gongmang")?;
            HarmonyEngine.gongmang(a, b)
        }
        fn gyeokguk(&self, a: &SajuProfile, b: &SajuProfile) -> Result<Insight> {
            self.check("gyeokguk")?;
            HarmonyEngine.gyeokguk(a, b)
        }
        fn element_balance(&self, a: &SajuProfile, b: &SajuProfile) -> Result<Insight> {
            self.check("element_balance")?;
            HarmonyEngine.element_balance(a, b)
        }
        fn pillar_resonance(&self, a: &SajuProfile, b: &SajuProfile) -> Result<Insight> {
            self.check("pillar_resonance")?;
            HarmonyEngine.pillar_resonance(a, b)
        }
        fn synastry(&self, a: &AstrologyProfile, b: &AstrologyProfile) -> Result<Synastry> {
            self.check("synastry")?;
            HarmonyEngine.synastry(a, b)
        }
        fn aspects(&self, a: &AstrologyProfile, b: &AstrologyProfile) -> Result<Insight> {
            self.check("aspects")?;
            HarmonyEngine.aspects(a, b)
        }
        fn composite(&self, a: &AstrologyProfile, b: &AstrologyProfile) -> Result<Insight> {
            self.check("composite")?;
            HarmonyEngine.composite(a, b)
        }
        fn venus_mars(&self, a: &AstrologyProfile, b: &AstrologyProfile) -> Result<Insight> {
            self.check("venus_mars")?;
            HarmonyEngine.venus_mars(a, b)
        }
        fn mercury(&self, a: &AstrologyProfile, b: &AstrologyProfile) -> Result<Insight> {
            self.check("mercury")?;
            HarmonyEngine.mercury(a, b)
        }
        fn jupiter(&self, a: &AstrologyProfile, b: &AstrologyProfile) -> Result<Insight> {
            self.check("jupiter")?;
            HarmonyEngine.jupiter(a, b)
        }
        fn saturn(&self, a: &AstrologyProfile, b: &AstrologyProfile) -> Result<Insight> {
            self.check("saturn")?;
            HarmonyEngine.saturn(a, b)
        }
        fn outer_planets(&self, a: &AstrologyProfile, b: &AstrologyProfile) -> Result<Insight> {
            self.check("outer_planets")?;
            HarmonyEngine.outer_planets(a, b)
        }
        fn nodes(&self, a: &AstrologyProfile, b: &AstrologyProfile) -> Result<Insight> {
            self.check("nodes")?;
            HarmonyEngine.nodes(a, b)
        }
        fn cross_system(
            &self,
            saju_a: &SajuProfile,
            saju_b: &SajuProfile,
            astro_a: &AstrologyProfile,
            astro_b: &AstrologyProfile,
        ) -> Result<CrossSystemAnalysis> {
            self.check("cross_system")?;
            HarmonyEngine.cross_system(saju_a, saju_b, astro_a, astro_b)
        }
    }

    fn couple() -> Vec<PersonInput> {
        vec![
            PersonInput {
                name: Some("A".to_string()),
                saju: Some(json!({
                    "dayMaster": { "name": "丙", "element": "fire" },
                    "pillars": {
                        "year": { "heavenlyStem": "庚", "earthlyBranch": "午" },
                        "month": { "heavenlyStem": "戊", "earthlyBranch": "寅" },
                        "day": { "heavenlyStem": "丙", "earthlyBranch": "子" },
                        "time": { "heavenlyStem": "甲", "earthlyBranch": "午" }
                    },
                    "fiveElements": { "wood": 20, "fire": 35, "earth": 15, "metal": 20, "water": 10 }
                })),
                astro: Some(json!({
                    "planets": [
                        { "name": "Sun", "sign": "Leo" },
                        { "name": "Moon", "sign": "Taurus" },
                        { "name": "Venus", "sign": "Cancer" },
                        { "name": "Mars", "sign": "Aries" }
                    ],
                    "ascendant": "Virgo"
                })),
            },
            PersonInput {
                name: Some("B".to_string()),
                saju: Some(json!({
                    "dayMaster": { "heavenlyStem": "癸" },
                    "dayPillar": { "heavenlyStem": "癸", "earthlyBranch": "酉" },
                    "elements": { "wood": 10, "fire": 10, "earth": 20, "metal": 30, "water": 30 }
                })),
                astro: Some(json!({
                    "planets": { "sun": { "sign": "Sagittarius" }, "moon": "Pisces" }
                })),
            },
        ]
    }

    #[test]
    fn full_pipeline_populates_every_section() {
        let result = compute_compatibility(&HarmonyEngine, couple(), Locale::En);

        assert!(result.saju.saju_analysis.is_some());
        assert!(result.saju.pillar_resonance.is_some());
        assert!(result.astro.synastry.is_some());
        assert!(result.astro.nodes.is_some());
        assert!(result.cross_system_analysis.is_some());
        assert!((0..=100).contains(&result.scores.overall_score));
        assert_eq!(result.persons.len(), 2);
        assert!(result.astro_profiles[1].as_ref().expect("astro b").ascendant.is_none());
        assert!(!result.headline.is_empty());
    }

    #[test]
    fn one_failing_saju_call_masks_the_whole_saju_block() {
        let engine = FailingEngine { fail: "gongmang" };
        let result = compute_compatibility(&engine, couple(), Locale::En);

        assert_eq!(result.saju, SajuInsights::default());
        assert_eq!(result.scores.saju_score, FALLBACK_SCORE);
        assert!(result.astro.synastry.is_some());
        assert!(result.cross_system_analysis.is_some());
    }

    #[test]
    fn one_failing_extended_call_masks_the_whole_astro_block() {
        let engine = FailingEngine { fail: "saturn" };
        let result = compute_compatibility(&engine, couple(), Locale::En);

        assert_eq!(result.astro, AstroInsights::default());
        assert_eq!(result.scores.astro_score, FALLBACK_SCORE);
        assert!(result.saju.saju_analysis.is_some());
    }

    #[test]
    fn failing_cross_system_leaves_other_blocks_intact() {
        let engine = FailingEngine { fail: "cross_system" };
        let result = compute_compatibility(&engine, couple(), Locale::En);

        assert!(result.cross_system_analysis.is_none());
        assert_eq!(result.scores.cross_score, FALLBACK_SCORE);
        assert!(result.saju.saju_analysis.is_some());
        assert!(result.astro.synastry.is_some());
    }

    #[test]
    fn missing_points_skip_only_their_extended_analysis() {
        let mut a = build_astro_profile(Some(&json!({ "sun": "leo" }))).expect("a");
        let b = build_astro_profile(Some(&json!({ "sun": "aries" }))).expect("b");
        a.mercury = None;
        a.pluto = None;

        let insights = run_astro_analyses(&HarmonyEngine, Some(&a), Some(&b));
        assert!(insights.mercury.is_none());
        assert!(insights.outer_planets.is_none());
        assert!(insights.jupiter.is_some());
        assert!(insights.saturn.is_some());
        assert!(insights.nodes.is_some());
        assert!(insights.synastry.is_some());
    }

    #[test]
    fn lone_person_degrades_to_fallback_scores() {
        let mut persons = couple();
        persons.truncate(1);
        let result = compute_compatibility(&HarmonyEngine, persons, Locale::Ko);

        assert!(result.saju_profiles[1].is_none());
        assert!(result.saju.saju_analysis.is_none());
        assert!(result.astro.synastry.is_none());
        assert!(result.cross_system_analysis.is_none());
        assert_eq!(result.scores.overall_score, 65);
        assert_eq!(result.headline, headline(65, Locale::Ko));
    }

    #[test]
    fn cross_system_needs_all_four_profiles() {
        let mut persons = couple();
        persons[1].astro = None;
        let result = compute_compatibility(&HarmonyEngine, persons, Locale::En);

        assert!(result.saju.saju_analysis.is_some());
        assert!(result.astro.synastry.is_none());
        assert!(result.cross_system_analysis.is_none());
    }

    #[test]
    fn stem_only_day_pillar_keeps_the_saju_block() {
        let mut persons = couple();
        // The branch defaults to 子, which does not pair with 乙.
        persons[0].saju = Some(json!({ "pillars": { "day": { "heavenlyStem": "乙" } } }));
        let result = compute_compatibility(&HarmonyEngine, persons, Locale::En);

        assert!(result.saju.saju_analysis.is_some());
        assert!(result.saju.gongmang.is_some());
        assert!(result.saju.gyeokguk.is_some());
        assert!(result.cross_system_analysis.is_some());
    }

    #[test]
    fn sign_outside_the_wheel_keeps_the_astro_block() {
        let mut persons = couple();
        persons[0].astro = Some(json!({
            "planets": [
                { "name": "Sun", "sign": "Ophiuchus" },
                { "name": "Moon", "sign": "Taurus" },
                { "name": "Venus", "sign": "Ophiuchus" },
                { "name": "Mars", "sign": "Aries" }
            ]
        }));
        let result = compute_compatibility(&HarmonyEngine, persons, Locale::En);

        let synastry = result.astro.synastry.as_ref().expect("synastry");
        assert!(synastry.compatibility_index.is_some());
        assert!(result.astro.aspects.is_some());
        assert!(result.astro.composite.is_some());
        assert!(result.astro.venus_mars.is_some());
        assert_eq!(
            Some(result.scores.astro_score),
            synastry.compatibility_index
        );
    }

    #[test]
    fn zero_element_weights_keep_the_saju_block() {
        let mut persons = couple();
        let zero = json!({ "wood": 0, "fire": 0, "earth": 0, "metal": 0, "water": 0 });
        for (person, day) in persons.iter_mut().zip(["丙", "癸"]) {
            person.saju = Some(json!({
                "dayMaster": { "name": day },
                "fiveElements": zero.clone()
            }));
        }
        let result = compute_compatibility(&HarmonyEngine, persons, Locale::En);

        assert!(result.saju.saju_analysis.is_some());
        let balance = result.saju.element_balance.as_ref().expect("balance");
        assert_eq!(balance.score, 100);
        assert!(result.saju.yongsin.is_some());
    }

    #[test]
    fn headline_bands() {
        assert_eq!(headline(90, Locale::En), headline(85, Locale::En));
        assert_ne!(headline(84, Locale::En), headline(85, Locale::En));
        assert_ne!(headline(54, Locale::Ko), headline(55, Locale::Ko));
        assert_ne!(headline(70, Locale::En), headline(70, Locale::Ko));
    }
}
