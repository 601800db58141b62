use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{is_falsy, text_of};

const DEFAULT_DAY_MASTER_NAME: &str = "甲";
const DEFAULT_DAY_MASTER_ELEMENT: &str = "wood";
const DEFAULT_STEM: &str = "甲";
const DEFAULT_BRANCH: &str = "子";
const EVEN_ELEMENT_WEIGHT: f64 = 20.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayMaster {
    pub name: String,
    pub element: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pillar {
    pub stem: String,
    pub branch: String,
}

impl Default for Pillar {
    fn default() -> Self {
        Self {
            stem: DEFAULT_STEM.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pillars {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub time: Pillar,
}

impl Pillars {
    pub fn get(&self, slot: PillarSlot) -> &Pillar {
        match slot {
            PillarSlot::Year => &self.year,
            PillarSlot::Month => &self.month,
            PillarSlot::Day => &self.day,
            PillarSlot::Time => &self.time,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pillar> {
        PillarSlot::ALL.into_iter().map(|slot| self.get(slot))
    }
}

/// Relative strength of the five elements in a chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FiveElements {
    pub wood: f64,
    pub fire: f64,
    pub earth: f64,
    pub metal: f64,
    pub water: f64,
}

impl Default for FiveElements {
    fn default() -> Self {
        Self {
            wood: EVEN_ELEMENT_WEIGHT,
            fire: EVEN_ELEMENT_WEIGHT,
            earth: EVEN_ELEMENT_WEIGHT,
            metal: EVEN_ELEMENT_WEIGHT,
            water: EVEN_ELEMENT_WEIGHT,
        }
    }
}

impl FiveElements {
    pub const NAMES: [&'static str; 5] = ["wood", "fire", "earth", "metal", "water"];

    pub fn get(&self, name: &str) -> Option<f64> {
        match name {
            "wood" => Some(self.wood),
            "fire" => Some(self.fire),
            "earth" => Some(self.earth),
            "metal" => Some(self.metal),
            "water" => Some(self.water),
            _ => None,
        }
    }

    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("wood", self.wood),
            ("fire", self.fire),
            ("earth", self.earth),
            ("metal", self.metal),
            ("water", self.water),
        ]
    }

    pub fn total(&self) -> f64 {
        self.entries().iter().map(|(_, weight)| weight).sum()
    }

    pub fn strongest(&self) -> &'static str {
        self.entries()
            .into_iter()
            .fold(("wood", f64::MIN), |best, entry| {
                if entry.1 > best.1 { entry } else { best }
            })
            .0
    }

    pub fn weakest(&self) -> &'static str {
        self.entries()
            .into_iter()
            .fold(("wood", f64::MAX), |best, entry| {
                if entry.1 < best.1 { entry } else { best }
            })
            .0
    }

    fn from_value(value: &Value) -> Option<Self> {
        let map = value.as_object()?;
        let weight = |name: &str| map.get(name).and_then(Value::as_f64);
        if Self::NAMES.iter().all(|name| weight(*name).is_none()) {
            return None;
        }
        Some(Self {
            wood: weight("wood").unwrap_or(0.0),
            fire: weight("fire").unwrap_or(0.0),
            earth: weight("earth").unwrap_or(0.0),
            metal: weight("metal").unwrap_or(0.0),
            water: weight("water").unwrap_or(0.0),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SajuProfile {
    pub day_master: DayMaster,
    pub pillars: Pillars,
    pub elements: FiveElements,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PillarSlot {
    Year,
    Month,
    Day,
    Time,
}

impl PillarSlot {
    pub const ALL: [PillarSlot; 4] = [
        PillarSlot::Year,
        PillarSlot::Month,
        PillarSlot::Day,
        PillarSlot::Time,
    ];

    fn key(&self) -> &'static str {
        match self {
            PillarSlot::Year => "year",
            PillarSlot::Month => "month",
            PillarSlot::Day => "day",
            PillarSlot::Time => "time",
        }
    }

    fn legacy_key(&self) -> &'static str {
        match self {
            PillarSlot::Year => "yearPillar",
            PillarSlot::Month => "monthPillar",
            PillarSlot::Day => "dayPillar",
            PillarSlot::Time => "timePillar",
        }
    }
}

/// Build a canonical Saju profile, or `None` when there is no record at all.
pub fn build_saju_profile(raw: Option<&Value>) -> Option<SajuProfile> {
    if is_falsy(raw) {
        return None;
    }
    let raw = raw?;

    let day_master = DayMaster {
        name: day_master_name(raw).unwrap_or_else(|| DEFAULT_DAY_MASTER_NAME.to_string()),
        element: text_of(raw.pointer("/dayMaster/element"))
            .unwrap_or_else(|| DEFAULT_DAY_MASTER_ELEMENT.to_string()),
    };

    let pillars = Pillars {
        year: resolve_pillar(raw, PillarSlot::Year),
        month: resolve_pillar(raw, PillarSlot::Month),
        day: resolve_pillar(raw, PillarSlot::Day),
        time: resolve_pillar(raw, PillarSlot::Time),
    };

    let elements = raw
        .get("fiveElements")
        .and_then(FiveElements::from_value)
        .or_else(|| raw.get("elements").and_then(FiveElements::from_value))
        .unwrap_or_default();

    Some(SajuProfile {
        day_master,
        pillars,
        elements,
    })
}

fn day_master_name(raw: &Value) -> Option<String> {
    text_of(raw.pointer("/dayMaster/name"))
        .or_else(|| text_of(raw.pointer("/dayMaster/heavenlyStem")))
}

fn resolve_pillar(raw: &Value, slot: PillarSlot) -> Pillar {
    let structured = raw.get("pillars").and_then(|pillars| pillars.get(slot.key()));
    let legacy = raw.get(slot.legacy_key());
    let fallback = Pillar::default();

    Pillar {
        stem: pillar_part(structured, "heavenlyStem")
            .or_else(|| pillar_part(legacy, "heavenlyStem"))
            .unwrap_or(fallback.stem),
        branch: pillar_part(structured, "earthlyBranch")
            .or_else(|| pillar_part(legacy, "earthlyBranch"))
            .unwrap_or(fallback.branch),
    }
}

fn pillar_part(pillar: Option<&Value>, field: &str) -> Option<String> {
    text_of(pillar?.get(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn assert_fully_populated(profile: &SajuProfile) {
        assert!(!profile.day_master.name.is_empty());
        assert!(!profile.day_master.element.is_empty());
        for pillar in profile.pillars.iter() {
            assert!(!pillar.stem.is_empty());
            assert!(!pillar.branch.is_empty());
        }
        assert!(profile.elements.total() > 0.0);
    }

    #[test]
    fn falsy_input_builds_nothing() {
        assert!(build_saju_profile(None).is_none());
        assert!(build_saju_profile(Some(&Value::Null)).is_none());
        assert!(build_saju_profile(Some(&json!(false))).is_none());
        assert!(build_saju_profile(Some(&json!(""))).is_none());
    }

    #[test]
    fn empty_record_is_filled_with_defaults() {
        let profile = build_saju_profile(Some(&json!({}))).expect("profile");
        assert_fully_populated(&profile);
        assert_eq!(profile.day_master.name, "甲");
        assert_eq!(profile.day_master.element, "wood");
        assert_eq!(profile.pillars.time, Pillar::default());
        assert_eq!(profile.elements, FiveElements::default());
    }

    #[test]
    fn structured_pillars_win_over_legacy_fields() {
        let raw = json!({
            "pillars": { "day": { "heavenlyStem": "丙", "earthlyBranch": "午" } },
            "dayPillar": { "heavenlyStem": "壬", "earthlyBranch": "子" },
            "yearPillar": { "heavenlyStem": "庚", "earthlyBranch": "申" }
        });
        let profile = build_saju_profile(Some(&raw)).expect("profile");
        assert_eq!(profile.pillars.day.stem, "丙");
        assert_eq!(profile.pillars.day.branch, "午");
        assert_eq!(profile.pillars.year.stem, "庚");
        assert_eq!(profile.pillars.year.branch, "申");
        assert_eq!(profile.pillars.month, Pillar::default());
        assert_fully_populated(&profile);
    }

    #[test]
    fn mixes_structured_and_legacy_per_field() {
        let raw = json!({
            "pillars": { "month": { "heavenlyStem": "丁" } },
            "monthPillar": { "heavenlyStem": "癸", "earthlyBranch": "卯" }
        });
        let profile = build_saju_profile(Some(&raw)).expect("profile");
        assert_eq!(profile.pillars.month.stem, "丁");
        assert_eq!(profile.pillars.month.branch, "卯");
    }

    #[test]
    fn day_master_falls_back_to_heavenly_stem() {
        let raw = json!({ "dayMaster": { "heavenlyStem": { "name": "辛" }, "element": "metal" } });
        let profile = build_saju_profile(Some(&raw)).expect("profile");
        assert_eq!(profile.day_master.name, "辛");
        assert_eq!(profile.day_master.element, "metal");
    }

    #[test]
    fn elements_prefer_five_elements_then_elements() {
        let raw = json!({
            "fiveElements": { "wood": 40, "fire": 10 },
            "elements": { "water": 90 }
        });
        let profile = build_saju_profile(Some(&raw)).expect("profile");
        assert_eq!(profile.elements.wood, 40.0);
        assert_eq!(profile.elements.water, 0.0);

        let raw = json!({ "fiveElements": {}, "elements": { "water": 90 } });
        let profile = build_saju_profile(Some(&raw)).expect("profile");
        assert_eq!(profile.elements.water, 90.0);
        assert_eq!(profile.elements.strongest(), "water");
    }

    #[test]
    fn building_twice_is_structurally_equal() {
        let raw = json!({ "dayMaster": { "name": "戊" }, "elements": { "earth": 55.5 } });
        assert_eq!(build_saju_profile(Some(&raw)), build_saju_profile(Some(&raw)));
    }
}
