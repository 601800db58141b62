use anyhow::{Context, Result, anyhow};

use super::{
    CompatibilityEngine, CrossSystemAnalysis, Insight, SajuAnalysis, Synastry,
    cycles::{Branch, Phase, PhaseRelation, Stem, empty_branches},
    types::clamp_score,
    zodiac::{Aspect, element_harmony, midpoint, placement_index, sign_name},
};
use crate::profile::{
    AstrologyProfile, FiveElements, Placement, Point, SajuProfile, element_from_sign,
};

const LOVE_POINTS: [Point; 4] = [Point::Sun, Point::Moon, Point::Venus, Point::Mars];
const OUTER_POINTS: [Point; 3] = [Point::Uranus, Point::Neptune, Point::Pluto];
const MAX_ASPECT_HIGHLIGHTS: usize = 5;

/// Deterministic engine built on five-phase cycles and whole-sign aspects.
#[derive(Debug, Clone, Copy, Default)]
pub struct HarmonyEngine;

impl CompatibilityEngine for HarmonyEngine {
    fn saju_analysis(&self, a: &SajuProfile, b: &SajuProfile) -> Result<SajuAnalysis> {
        let phase_a = day_phase(a)?;
        let phase_b = day_phase(b)?;
        let relation = phase_a.relation_to(phase_b);
        let overall = relation_score(relation) * 0.6 + complement_score(&a.elements, &b.elements) * 0.4;

        Ok(SajuAnalysis {
            overall_score: Some(overall.round()),
            day_master_relation: relation.label().to_string(),
            summary: format!(
                "A {} day master meets a {} day master ({}).",
                phase_a.as_str(),
                phase_b.as_str(),
                relation.label()
            ),
        })
    }

    fn ten_gods(&self, a: &SajuProfile, b: &SajuProfile) -> Result<Insight> {
        let stem_a = day_stem(a)?;
        let stem_b = day_stem(b)?;
        let (god_for_a, score_a) = ten_god(stem_a, stem_b);
        let (god_for_b, score_b) = ten_god(stem_b, stem_a);

        Ok(Insight::new(
            (score_a + score_b) / 2.0,
            format!("Each partner reads the other as {god_for_a} / {god_for_b}."),
        )
        .with_highlights(vec![
            format!("Partner B is partner A's {god_for_a}"),
            format!("Partner A is partner B's {god_for_b}"),
        ]))
    }

    fn shinsals(&self, a: &SajuProfile, b: &SajuProfile) -> Result<Insight> {
        let mut highlights = Vec::new();
        for (label, me, other) in [("A", a, b), ("B", b, a)] {
            let Some(day) = Branch::parse(&me.pillars.day.branch) else {
                continue;
            };
            let blossom = day.peach_blossom();
            if branches(other).contains(&blossom) {
                highlights.push(format!(
                    "Partner {label}'s peach blossom ({}) appears in the other chart",
                    blossom.hanja()
                ));
            }
        }

        let summary = if highlights.is_empty() {
            "No shared special stars; attraction builds slowly."
        } else {
            "Peach blossom stars tie the charts together."
        };
        Ok(Insight::new(60.0 + 15.0 * highlights.len() as f64, summary).with_highlights(highlights))
    }

    fn harmonies(&self, a: &SajuProfile, b: &SajuProfile) -> Result<Insight> {
        let mut highlights = Vec::new();
        let mut score = 55.0;

        let (stem_a, stem_b) = (day_stem(a)?, day_stem(b)?);
        if stem_a.combines_with(stem_b) {
            score += 20.0;
            highlights.push(format!(
                "Day stems {}{} form a heavenly combination",
                stem_a.hanja(),
                stem_b.hanja()
            ));
        }

        for branch_a in branches(a) {
            for branch_b in branches(b) {
                if branch_a.harmonizes_with(branch_b) {
                    score += 6.0;
                    highlights.push(format!(
                        "Branches {}{} harmonize",
                        branch_a.hanja(),
                        branch_b.hanja()
                    ));
                }
            }
        }

        let summary = if highlights.is_empty() {
            "Few natural combinations; harmony comes from effort."
        } else {
            "Natural combinations soften the bond."
        };
        Ok(Insight::new(score, summary).with_highlights(highlights))
    }

    fn clashes(&self, a: &SajuProfile, b: &SajuProfile) -> Result<Insight> {
        let mut highlights = Vec::new();
        let mut score = 90.0;

        for branch_a in branches(a) {
            for branch_b in branches(b) {
                if branch_a.clashes_with(branch_b) {
                    score -= 8.0;
                    highlights.push(format!(
                        "Branches {}{} clash",
                        branch_a.hanja(),
                        branch_b.hanja()
                    ));
                }
            }
        }

        if let (Some(day_a), Some(day_b)) = (
            Branch::parse(&a.pillars.day.branch),
            Branch::parse(&b.pillars.day.branch),
        ) && day_a.clashes_with(day_b)
        {
            score -= 10.0;
            highlights.push("Day branches clash: daily rhythms pull apart".to_string());
        }

        let summary = if highlights.is_empty() {
            "No branch clashes between the charts."
        } else {
            "Clashing branches call for patience."
        };
        Ok(Insight::new(score, summary).with_highlights(highlights))
    }

    fn yongsin(&self, a: &SajuProfile, b: &SajuProfile) -> Result<Insight> {
        let mut score = 50.0;
        let mut highlights = Vec::new();

        for (label, me, other) in [("A", a, b), ("B", b, a)] {
            let (Some(needed), Some(offered)) = (
                Phase::parse(me.elements.weakest()),
                Phase::parse(other.elements.strongest()),
            ) else {
                continue;
            };
            if offered == needed {
                score += 25.0;
                highlights.push(format!(
                    "Partner {label} gains the {} they lack",
                    needed.as_str()
                ));
            } else if offered.generates() == needed {
                score += 12.0;
                highlights.push(format!(
                    "Partner {label} is fed towards {} indirectly",
                    needed.as_str()
                ));
            }
        }

        Ok(Insight::new(score, "Useful-element support between the partners.")
            .with_highlights(highlights))
    }

    fn gongmang(&self, a: &SajuProfile, b: &SajuProfile) -> Result<Insight> {
        let mut score = 80.0;
        let mut highlights = Vec::new();

        for (label, me, other) in [("A", a, b), ("B", b, a)] {
            // Only a real sexagenary day pillar has empty branches.
            let Some(empty) = Stem::parse(&me.pillars.day.stem)
                .zip(Branch::parse(&me.pillars.day.branch))
                .and_then(|(stem, branch)| empty_branches(stem, branch))
            else {
                continue;
            };

            for branch in [&other.pillars.day.branch, &other.pillars.year.branch]
                .into_iter()
                .filter_map(|value| Branch::parse(value))
            {
                if empty.contains(&branch) {
                    score -= 15.0;
                    highlights.push(format!(
                        "{} falls in partner {label}'s empty branches",
                        branch.hanja()
                    ));
                }
            }
        }

        let summary = if highlights.is_empty() {
            "No empty-branch gaps between the charts."
        } else {
            "Empty branches leave some expectations unmet."
        };
        Ok(Insight::new(score, summary).with_highlights(highlights))
    }

    fn gyeokguk(&self, a: &SajuProfile, b: &SajuProfile) -> Result<Insight> {
        let (Some(pattern_a), Some(pattern_b)) = (pattern(a)?, pattern(b)?) else {
            return Ok(Insight::new(65.0, "The month pillars do not reveal a clear pattern."));
        };

        let score = if pattern_a == pattern_b {
            70.0
        } else if pattern_a.feeds() == pattern_b || pattern_b.feeds() == pattern_a {
            82.0
        } else {
            58.0
        };

        Ok(Insight::new(
            score,
            format!(
                "{} pattern meets {} pattern.",
                pattern_a.label(),
                pattern_b.label()
            ),
        ))
    }

    fn element_balance(&self, a: &SajuProfile, b: &SajuProfile) -> Result<Insight> {
        let mut combined: Vec<(&str, f64)> = a
            .elements
            .entries()
            .iter()
            .zip(b.elements.entries())
            .map(|((name, left), (_, right))| (*name, left + right))
            .collect();
        let mut total: f64 = combined.iter().map(|(_, weight)| weight).sum();
        if total <= 0.0 {
            // No usable weights: read it as an even split.
            for (_, weight) in combined.iter_mut() {
                *weight = 1.0;
            }
            total = combined.len() as f64;
        }

        let max = combined.iter().map(|(_, w)| *w).fold(f64::MIN, f64::max);
        let min = combined.iter().map(|(_, w)| *w).fold(f64::MAX, f64::min);
        let spread = (max - min) / total;

        let highlights = combined
            .iter()
            .map(|(name, weight)| format!("{name}: {:.0}%", weight / total * 100.0))
            .collect();
        Ok(Insight::new(100.0 - spread * 150.0, "Combined five-element balance.")
            .with_highlights(highlights))
    }

    fn pillar_resonance(&self, a: &SajuProfile, b: &SajuProfile) -> Result<Insight> {
        let mut matches = 0_u32;
        for (left, right) in a.pillars.iter().zip(b.pillars.iter()) {
            if left.stem.trim() == right.stem.trim() {
                matches += 1;
            }
            if left.branch.trim() == right.branch.trim() {
                matches += 1;
            }
        }

        Ok(Insight::new(
            (55.0 + 8.0 * f64::from(matches)).min(95.0),
            format!("{matches} of 8 pillar characters are shared."),
        ))
    }

    fn synastry(&self, a: &AstrologyProfile, b: &AstrologyProfile) -> Result<Synastry> {
        let sun = element_harmony(a.sun.element, b.sun.element);
        let moon = element_harmony(a.moon.element, b.moon.element);
        let luminaries = (element_harmony(a.sun.element, b.moon.element)
            + element_harmony(b.sun.element, a.moon.element))
            / 2.0;
        let love = (element_harmony(a.venus.element, b.mars.element)
            + element_harmony(b.venus.element, a.mars.element))
            / 2.0;
        let index = (sun + moon + luminaries + love) / 4.0;

        Ok(Synastry {
            compatibility_index: Some(index.round()),
            sun_harmony: clamp_score(sun),
            moon_harmony: clamp_score(moon),
            love_harmony: clamp_score(love),
            summary: format!(
                "{} sun with {} sun, {} moon with {} moon.",
                a.sun.sign, b.sun.sign, a.moon.sign, b.moon.sign
            ),
        })
    }

    fn aspects(&self, a: &AstrologyProfile, b: &AstrologyProfile) -> Result<Insight> {
        let mut score = 60.0;
        let mut highlights = Vec::new();

        for point_a in LOVE_POINTS {
            for point_b in LOVE_POINTS {
                let (left, right) = (placement(a, point_a)?, placement(b, point_b)?);
                let Some(aspect) = Aspect::between(left, right) else {
                    score += (element_harmony(left.element, right.element) - 60.0) / 10.0;
                    continue;
                };
                if aspect.is_harmonious() {
                    score += 4.0;
                } else if aspect.is_tense() {
                    score -= 4.0;
                } else if aspect == Aspect::Conjunction {
                    score += 3.0;
                }
                if aspect != Aspect::Minor && highlights.len() < MAX_ASPECT_HIGHLIGHTS {
                    highlights.push(format!(
                        "A's {} {} B's {}",
                        point_a.key(),
                        aspect.label(),
                        point_b.key()
                    ));
                }
            }
        }

        Ok(Insight::new(score, "Cross-chart aspects between the personal points.")
            .with_highlights(highlights))
    }

    fn composite(&self, a: &AstrologyProfile, b: &AstrologyProfile) -> Result<Insight> {
        let (Some(sun), Some(moon)) = (
            composite_sign(&a.sun, &b.sun),
            composite_sign(&a.moon, &b.moon),
        ) else {
            let score = (element_harmony(a.sun.element, b.sun.element)
                + element_harmony(a.moon.element, b.moon.element))
                / 2.0;
            return Ok(Insight::new(
                score,
                "The composite chart is read from the luminaries' elements alone.",
            ));
        };
        let score = element_harmony(element_from_sign(sun), element_from_sign(moon));

        Ok(Insight::new(
            score,
            format!("The relationship itself has its sun in {sun} and moon in {moon}."),
        ))
    }

    fn venus_mars(&self, a: &AstrologyProfile, b: &AstrologyProfile) -> Result<Insight> {
        let forward = pair_score(&a.venus, &b.mars);
        let backward = pair_score(&b.venus, &a.mars);

        Ok(Insight::new(
            (forward + backward) / 2.0,
            format!(
                "Venus in {} meets Mars in {}; Venus in {} meets Mars in {}.",
                a.venus.sign, b.mars.sign, b.venus.sign, a.mars.sign
            ),
        ))
    }

    fn mercury(&self, a: &AstrologyProfile, b: &AstrologyProfile) -> Result<Insight> {
        let (left, right) = (placement(a, Point::Mercury)?, placement(b, Point::Mercury)?);
        Ok(Insight::new(
            pair_score(left, right),
            format!(
                "Mercury in {} talks with Mercury in {}.",
                left.sign, right.sign
            ),
        ))
    }

    fn jupiter(&self, a: &AstrologyProfile, b: &AstrologyProfile) -> Result<Insight> {
        let mut total = 0.0;
        let mut blessings = 0_u32;
        for (jupiter, sun) in [
            (placement(a, Point::Jupiter)?, &b.sun),
            (placement(b, Point::Jupiter)?, &a.sun),
        ] {
            match Aspect::between(jupiter, sun) {
                Some(aspect) => {
                    total += aspect.score();
                    if aspect.is_harmonious() || aspect == Aspect::Conjunction {
                        blessings += 1;
                    }
                }
                None => total += element_harmony(jupiter.element, sun.element),
            }
        }

        Ok(Insight::new(
            total / 2.0 + 5.0 * f64::from(blessings),
            "Jupiter contacts show where the partners help each other grow.",
        ))
    }

    fn saturn(&self, a: &AstrologyProfile, b: &AstrologyProfile) -> Result<Insight> {
        let mut scores = Vec::new();
        let mut highlights = Vec::new();

        for (label, me, other) in [("A", a, b), ("B", b, a)] {
            let saturn = placement(me, Point::Saturn)?;
            for target in [Point::Sun, Point::Moon] {
                let point = placement(other, target)?;
                let Some(aspect) = Aspect::between(saturn, point) else {
                    scores.push(element_harmony(saturn.element, point.element));
                    continue;
                };
                if aspect.is_tense() {
                    highlights.push(format!(
                        "{label}'s Saturn tests the other's {}",
                        target.key()
                    ));
                }
                scores.push(aspect.score());
            }
        }

        let average = scores.iter().sum::<f64>() / scores.len() as f64;
        Ok(Insight::new(average, "Saturn contacts describe long-term commitment.")
            .with_highlights(highlights))
    }

    fn outer_planets(&self, a: &AstrologyProfile, b: &AstrologyProfile) -> Result<Insight> {
        let mut shared = Vec::new();
        for point in OUTER_POINTS {
            if placement(a, point)?.sign == placement(b, point)?.sign {
                shared.push(point.key().to_string());
            }
        }

        Ok(Insight::new(
            60.0 + 10.0 * shared.len() as f64,
            "Outer planets describe generational common ground.",
        )
        .with_highlights(shared))
    }

    fn nodes(&self, a: &AstrologyProfile, b: &AstrologyProfile) -> Result<Insight> {
        let mut score = 60.0;
        let mut highlights = Vec::new();

        for (label, me, other) in [("A", a, b), ("B", b, a)] {
            let north = placement(me, Point::NorthNode)?;
            let south = placement(me, Point::SouthNode)?;
            for target in [Point::Sun, Point::Moon] {
                let point = placement(other, target)?;
                if north.sign == point.sign {
                    score += 12.0;
                    highlights.push(format!(
                        "{label}'s north node meets the other's {}",
                        target.key()
                    ));
                }
                if south.sign == point.sign {
                    score += 6.0;
                    highlights.push(format!(
                        "{label}'s south node echoes the other's {}",
                        target.key()
                    ));
                }
            }
        }

        Ok(Insight::new(score, "Lunar nodes point at a shared direction.")
            .with_highlights(highlights))
    }

    fn cross_system(
        &self,
        saju_a: &SajuProfile,
        saju_b: &SajuProfile,
        astro_a: &AstrologyProfile,
        astro_b: &AstrologyProfile,
    ) -> Result<CrossSystemAnalysis> {
        let phase_a = day_phase(saju_a)?;
        let phase_b = day_phase(saju_b)?;

        let pairs = [
            ("A's day master", phase_a, "B's sun", &astro_b.sun),
            ("B's day master", phase_b, "A's sun", &astro_a.sun),
            ("A's day master", phase_a, "B's moon", &astro_b.moon),
            ("B's day master", phase_b, "A's moon", &astro_a.moon),
        ];

        let mut total = 0.0;
        let mut resonances = Vec::new();
        for (left, phase, right, point) in pairs {
            let relation = phase.relation_to(Phase::from_element(point.element));
            total += cross_affinity(relation);
            resonances.push(format!(
                "{left} ({}) is {} towards {right} ({})",
                phase.as_str(),
                relation.label(),
                point.sign
            ));
        }

        for (label, phase, sun) in [("A", phase_a, &astro_a.sun), ("B", phase_b, &astro_b.sun)] {
            if Phase::from_element(sun.element) == phase {
                resonances.push(format!("{label}'s day master and sun share one element"));
            }
        }

        Ok(CrossSystemAnalysis {
            cross_system_score: Some((total / pairs.len() as f64).round()),
            resonances,
            summary: "Eastern day masters read against Western luminaries.".to_string(),
        })
    }
}

fn day_stem(profile: &SajuProfile) -> Result<Stem> {
    Stem::parse(&profile.day_master.name)
        .or_else(|| Stem::parse(&profile.pillars.day.stem))
        .ok_or_else(|| anyhow!("unrecognised day master '{}'", profile.day_master.name))
}

fn day_phase(profile: &SajuProfile) -> Result<Phase> {
    match Phase::parse(&profile.day_master.element) {
        Some(phase) => Ok(phase),
        None => day_stem(profile).map(|stem| stem.phase()),
    }
}

/// Recognised branches of all four pillars; unreadable ones are skipped.
fn branches(profile: &SajuProfile) -> Vec<Branch> {
    profile
        .pillars
        .iter()
        .filter_map(|pillar| Branch::parse(&pillar.branch))
        .collect()
}

fn placement(profile: &AstrologyProfile, point: Point) -> Result<&Placement> {
    profile
        .placement(point)
        .with_context(|| format!("profile has no {} placement", point.key()))
}

fn pair_score(a: &Placement, b: &Placement) -> f64 {
    let elements = element_harmony(a.element, b.element);
    match Aspect::between(a, b) {
        Some(aspect) => aspect.score() * 0.5 + elements * 0.5,
        None => elements,
    }
}

fn composite_sign(a: &Placement, b: &Placement) -> Option<&'static str> {
    Some(sign_name(midpoint(placement_index(a)?, placement_index(b)?)))
}

fn relation_score(relation: PhaseRelation) -> f64 {
    match relation {
        PhaseRelation::Same => 75.0,
        PhaseRelation::Generates | PhaseRelation::GeneratedBy => 85.0,
        PhaseRelation::Controls => 60.0,
        PhaseRelation::ControlledBy => 55.0,
    }
}

fn cross_affinity(relation: PhaseRelation) -> f64 {
    match relation {
        PhaseRelation::Same => 80.0,
        PhaseRelation::Generates | PhaseRelation::GeneratedBy => 88.0,
        PhaseRelation::Controls | PhaseRelation::ControlledBy => 58.0,
    }
}

/// How well each partner's strongest element covers the other's weakest.
fn complement_score(a: &FiveElements, b: &FiveElements) -> f64 {
    let share = |elements: &FiveElements, name: &str| {
        let total = elements.total();
        if total <= 0.0 {
            1.0 / FiveElements::NAMES.len() as f64
        } else {
            elements.get(name).unwrap_or_default() / total
        }
    };
    let covered = share(b, a.weakest()) + share(a, b.weakest());
    (40.0 + 100.0 * covered).min(100.0)
}

/// Ten Gods (십신) name of `other` as seen from `me`, with a harmony weight.
fn ten_god(me: Stem, other: Stem) -> (&'static str, f64) {
    let same_polarity = me.is_yang() == other.is_yang();
    match (me.phase().relation_to(other.phase()), same_polarity) {
        (PhaseRelation::Same, true) => ("Companion", 70.0),
        (PhaseRelation::Same, false) => ("Rob Wealth", 55.0),
        (PhaseRelation::Generates, true) => ("Eating God", 80.0),
        (PhaseRelation::Generates, false) => ("Hurting Officer", 55.0),
        (PhaseRelation::Controls, true) => ("Indirect Wealth", 70.0),
        (PhaseRelation::Controls, false) => ("Direct Wealth", 85.0),
        (PhaseRelation::ControlledBy, true) => ("Seven Killings", 50.0),
        (PhaseRelation::ControlledBy, false) => ("Direct Officer", 85.0),
        (PhaseRelation::GeneratedBy, true) => ("Indirect Resource", 65.0),
        (PhaseRelation::GeneratedBy, false) => ("Direct Resource", 85.0),
    }
}

/// Gyeokguk family, taken from the month branch as seen from the day master.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pattern {
    Peer,
    Output,
    Wealth,
    Officer,
    Resource,
}

impl Pattern {
    fn label(&self) -> &'static str {
        match self {
            Pattern::Peer => "Peer",
            Pattern::Output => "Output",
            Pattern::Wealth => "Wealth",
            Pattern::Officer => "Officer",
            Pattern::Resource => "Resource",
        }
    }

    fn feeds(&self) -> Pattern {
        match self {
            Pattern::Peer => Pattern::Output,
            Pattern::Output => Pattern::Wealth,
            Pattern::Wealth => Pattern::Officer,
            Pattern::Officer => Pattern::Resource,
            Pattern::Resource => Pattern::Peer,
        }
    }
}

fn pattern(profile: &SajuProfile) -> Result<Option<Pattern>> {
    let phase = day_phase(profile)?;
    let Some(month) = Branch::parse(&profile.pillars.month.branch) else {
        return Ok(None);
    };
    Ok(Some(match phase.relation_to(month.phase()) {
        PhaseRelation::Same => Pattern::Peer,
        PhaseRelation::Generates => Pattern::Output,
        PhaseRelation::Controls => Pattern::Wealth,
        PhaseRelation::ControlledBy => Pattern::Officer,
        PhaseRelation::GeneratedBy => Pattern::Resource,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{build_astro_profile, build_saju_profile};
    use serde_json::json;

    fn saju(day_stem: &str, day_branch: &str) -> SajuProfile {
        build_saju_profile(Some(&json!({
            "dayMaster": { "name": day_stem },
            "pillars": { "day": { "heavenlyStem": day_stem, "earthlyBranch": day_branch } }
        })))
        .expect("saju profile")
    }

    fn astro(sun: &str, moon: &str) -> AstrologyProfile {
        build_astro_profile(Some(&json!({ "sun": sun, "moon": moon }))).expect("astro profile")
    }

    #[test]
    fn saju_analysis_scores_within_bounds() {
        let engine = HarmonyEngine;
        let result = engine
            .saju_analysis(&saju("甲", "子"), &saju("丙", "午"))
            .expect("analysis");
        let score = result.overall_score.expect("score");
        assert!((0.0..=100.0).contains(&score));
    }

    #[test]
    fn unknown_day_master_is_an_error() {
        let engine = HarmonyEngine;
        let mut broken = saju("甲", "子");
        broken.day_master.name = "???".to_string();
        broken.day_master.element = "plasma".to_string();
        broken.pillars.day.stem = "???".to_string();
        assert!(engine.ten_gods(&broken, &saju("乙", "丑")).is_err());
        assert!(engine.saju_analysis(&broken, &saju("乙", "丑")).is_err());
    }

    #[test]
    fn ten_gods_follow_polarity() {
        assert_eq!(ten_god(Stem(0), Stem(0)).0, "Companion");
        assert_eq!(ten_god(Stem(0), Stem(1)).0, "Rob Wealth");
        // 甲 wood controls 己 earth with opposite polarity.
        assert_eq!(ten_god(Stem(0), Stem(5)).0, "Direct Wealth");
        // 庚 metal controls 甲 wood with the same polarity.
        assert_eq!(ten_god(Stem(0), Stem(6)).0, "Seven Killings");
    }

    #[test]
    fn clashing_day_branches_lower_the_score() {
        let engine = HarmonyEngine;
        let calm = engine.clashes(&saju("甲", "子"), &saju("甲", "子")).expect("calm");
        let tense = engine.clashes(&saju("甲", "子"), &saju("庚", "午")).expect("tense");
        assert!(tense.score < calm.score);
        assert!(!tense.highlights.is_empty());
    }

    #[test]
    fn gongmang_skips_pillars_outside_the_cycle() {
        let engine = HarmonyEngine;
        // 甲丑 has mismatched polarity, so only B's 甲子 pillar is read.
        let skipped = engine
            .gongmang(&saju("甲", "丑"), &saju("甲", "子"))
            .expect("gongmang");
        assert_eq!(skipped.score, 80);
        assert!(skipped.highlights.is_empty());

        // 甲子 leaves 戌亥 empty, and B's day branch is 亥.
        let hit = engine
            .gongmang(&saju("甲", "子"), &saju("乙", "亥"))
            .expect("gongmang");
        assert_eq!(hit.score, 65);
        assert_eq!(hit.highlights.len(), 1);
    }

    #[test]
    fn zero_element_weights_read_as_even_split() {
        let engine = HarmonyEngine;
        let mut a = saju("甲", "子");
        a.elements = FiveElements {
            wood: 0.0,
            fire: 0.0,
            earth: 0.0,
            metal: 0.0,
            water: 0.0,
        };
        let b = a.clone();
        let balance = engine.element_balance(&a, &b).expect("balance");
        assert_eq!(balance.score, 100);
        assert!(balance.highlights.iter().all(|line| line.ends_with("20%")));
    }

    #[test]
    fn unknown_signs_fall_back_to_elements() {
        let engine = HarmonyEngine;
        let chart = |sun: &str| {
            build_astro_profile(Some(&json!({
                "sun": sun, "moon": "leo", "venus": sun, "mars": "libra",
                "mercury": sun, "jupiter": sun, "saturn": "capricorn"
            })))
            .expect("astro profile")
        };
        let odd = chart("ophiuchus");
        let other = chart("aries");
        assert!(engine.aspects(&odd, &other).is_ok());
        assert!(engine.composite(&odd, &other).is_ok());
        assert!(engine.venus_mars(&odd, &other).is_ok());
        assert!(engine.jupiter(&odd, &other).is_ok());
        assert!(engine.saturn(&odd, &other).is_ok());
        assert!(engine.mercury(&odd, &other).is_ok());
        assert!(engine.synastry(&odd, &other).is_ok());
    }

    #[test]
    fn synastry_index_rewards_shared_elements() {
        let engine = HarmonyEngine;
        let fiery = engine
            .synastry(&astro("aries", "leo"), &astro("leo", "sagittarius"))
            .expect("synastry");
        let mixed = engine
            .synastry(&astro("aries", "leo"), &astro("cancer", "scorpio"))
            .expect("synastry");
        assert!(fiery.compatibility_index > mixed.compatibility_index);
    }

    #[test]
    fn mercury_requires_both_placements() {
        let engine = HarmonyEngine;
        let mut missing = astro("aries", "leo");
        missing.mercury = None;
        assert!(engine.mercury(&missing, &astro("leo", "leo")).is_err());
    }

    #[test]
    fn cross_system_reports_a_score() {
        let engine = HarmonyEngine;
        let result = engine
            .cross_system(
                &saju("丙", "午"),
                &saju("壬", "子"),
                &astro("leo", "cancer"),
                &astro("pisces", "scorpio"),
            )
            .expect("cross");
        let score = result.cross_system_score.expect("score");
        assert!((0.0..=100.0).contains(&score));
        assert!(result.resonances.len() >= 4);
    }
}
