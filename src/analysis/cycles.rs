//! Stem, branch and five-phase tables shared by the Saju analyses.

use crate::profile::Element;

/// One of the five phases (오행) of Saju.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

/// How one phase stands towards another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseRelation {
    Same,
    Generates,
    GeneratedBy,
    Controls,
    ControlledBy,
}

impl Phase {
    const CYCLE: [Phase; 5] = [
        Phase::Wood,
        Phase::Fire,
        Phase::Earth,
        Phase::Metal,
        Phase::Water,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        let phase = match value.trim().to_lowercase().as_str() {
            "wood" | "목" | "木" => Phase::Wood,
            "fire" | "화" | "火" => Phase::Fire,
            "earth" | "토" | "土" => Phase::Earth,
            "metal" | "금" | "金" => Phase::Metal,
            "water" | "수" | "水" => Phase::Water,
            _ => return None,
        };
        Some(phase)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Wood => "wood",
            Phase::Fire => "fire",
            Phase::Earth => "earth",
            Phase::Metal => "metal",
            Phase::Water => "water",
        }
    }

    fn position(&self) -> usize {
        Self::CYCLE
            .iter()
            .position(|phase| phase == self)
            .unwrap_or_default()
    }

    /// The phase this one feeds in the generating cycle (wood feeds fire).
    pub fn generates(&self) -> Phase {
        Self::CYCLE[(self.position() + 1) % 5]
    }

    /// The phase this one restrains in the controlling cycle (wood parts earth).
    pub fn controls(&self) -> Phase {
        Self::CYCLE[(self.position() + 2) % 5]
    }

    pub fn relation_to(&self, other: Phase) -> PhaseRelation {
        if *self == other {
            PhaseRelation::Same
        } else if self.generates() == other {
            PhaseRelation::Generates
        } else if other.generates() == *self {
            PhaseRelation::GeneratedBy
        } else if self.controls() == other {
            PhaseRelation::Controls
        } else {
            PhaseRelation::ControlledBy
        }
    }

    /// Western elements folded onto the five phases; air rides with wood (wind).
    pub fn from_element(element: Element) -> Self {
        match element {
            Element::Fire => Phase::Fire,
            Element::Earth => Phase::Earth,
            Element::Air => Phase::Wood,
            Element::Water => Phase::Water,
        }
    }
}

impl PhaseRelation {
    pub fn label(&self) -> &'static str {
        match self {
            PhaseRelation::Same => "same phase",
            PhaseRelation::Generates => "nurturing",
            PhaseRelation::GeneratedBy => "nurtured",
            PhaseRelation::Controls => "restraining",
            PhaseRelation::ControlledBy => "restrained",
        }
    }
}

const STEMS: [[&str; 3]; 10] = [
    ["甲", "갑", "gap"],
    ["乙", "을", "eul"],
    ["丙", "병", "byeong"],
    ["丁", "정", "jeong"],
    ["戊", "무", "mu"],
    ["己", "기", "gi"],
    ["庚", "경", "gyeong"],
    ["辛", "신", "sin"],
    ["壬", "임", "im"],
    ["癸", "계", "gye"],
];

const BRANCHES: [[&str; 3]; 12] = [
    ["子", "자", "ja"],
    ["丑", "축", "chuk"],
    ["寅", "인", "in"],
    ["卯", "묘", "myo"],
    ["辰", "진", "jin"],
    ["巳", "사", "sa"],
    ["午", "오", "o"],
    ["未", "미", "mi"],
    ["申", "신", "sin"],
    ["酉", "유", "yu"],
    ["戌", "술", "sul"],
    ["亥", "해", "hae"],
];

const BRANCH_PHASES: [Phase; 12] = [
    Phase::Water,
    Phase::Earth,
    Phase::Wood,
    Phase::Wood,
    Phase::Earth,
    Phase::Fire,
    Phase::Fire,
    Phase::Earth,
    Phase::Metal,
    Phase::Metal,
    Phase::Earth,
    Phase::Water,
];

fn lookup(table: &[[&str; 3]], value: &str) -> Option<usize> {
    let value = value.trim();
    table.iter().position(|names| {
        names.iter().any(|name| name.eq_ignore_ascii_case(value))
    })
}

/// Heavenly stem (천간) by position 0..10.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stem(pub usize);

impl Stem {
    pub fn parse(value: &str) -> Option<Self> {
        lookup(&STEMS, value).map(Stem)
    }

    pub fn phase(&self) -> Phase {
        Phase::CYCLE[self.0 / 2]
    }

    pub fn is_yang(&self) -> bool {
        self.0 % 2 == 0
    }

    pub fn hanja(&self) -> &'static str {
        STEMS[self.0][0]
    }

    /// 천간합: 甲己, 乙庚, 丙辛, 丁壬, 戊癸.
    pub fn combines_with(&self, other: Stem) -> bool {
        self.0.abs_diff(other.0) == 5
    }
}

/// Earthly branch (지지) by position 0..12.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Branch(pub usize);

impl Branch {
    pub fn parse(value: &str) -> Option<Self> {
        lookup(&BRANCHES, value).map(Branch)
    }

    pub fn phase(&self) -> Phase {
        BRANCH_PHASES[self.0]
    }

    pub fn hanja(&self) -> &'static str {
        BRANCHES[self.0][0]
    }

    /// 육합: 子丑, 寅亥, 卯戌, 辰酉, 巳申, 午未.
    pub fn harmonizes_with(&self, other: Branch) -> bool {
        (self.0 + other.0) % 12 == 1
    }

    /// 충: branches six apart.
    pub fn clashes_with(&self, other: Branch) -> bool {
        self.0.abs_diff(other.0) == 6
    }

    /// 도화 (peach blossom) branch for the trine this branch belongs to.
    pub fn peach_blossom(&self) -> Branch {
        match self.0 % 4 {
            0 => Branch(9),
            1 => Branch(6),
            2 => Branch(3),
            _ => Branch(0),
        }
    }
}

/// Position of a stem/branch pair in the sexagenary cycle, if the pair is valid.
pub fn sexagenary_index(stem: Stem, branch: Branch) -> Option<usize> {
    if stem.0 % 2 != branch.0 % 2 {
        return None;
    }
    Some((6 * stem.0 + 60 - (5 * branch.0) % 60) % 60)
}

/// The two "empty" branches (공망) of the decade a day pillar falls in.
pub fn empty_branches(stem: Stem, branch: Branch) -> Option<[Branch; 2]> {
    let index = sexagenary_index(stem, branch)?;
    let decade_start = index - index % 10;
    let first = (decade_start + 10) % 12;
    Some([Branch(first), Branch((first + 1) % 12)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_cycles() {
        assert_eq!(Phase::Wood.generates(), Phase::Fire);
        assert_eq!(Phase::Water.generates(), Phase::Wood);
        assert_eq!(Phase::Wood.controls(), Phase::Earth);
        assert_eq!(Phase::Metal.controls(), Phase::Wood);
        assert_eq!(Phase::Fire.relation_to(Phase::Metal), PhaseRelation::Controls);
        assert_eq!(Phase::Fire.relation_to(Phase::Water), PhaseRelation::ControlledBy);
        assert_eq!(Phase::Fire.relation_to(Phase::Wood), PhaseRelation::GeneratedBy);
    }

    #[test]
    fn parses_hanja_hangul_and_romanized_names() {
        assert_eq!(Stem::parse("甲"), Some(Stem(0)));
        assert_eq!(Stem::parse("계"), Some(Stem(9)));
        assert_eq!(Stem::parse("Byeong"), Some(Stem(2)));
        assert_eq!(Branch::parse("亥"), Some(Branch(11)));
        assert_eq!(Branch::parse("오"), Some(Branch(6)));
        assert_eq!(Stem::parse("unknown"), None);
    }

    #[test]
    fn combination_and_clash_tables() {
        assert!(Stem(0).combines_with(Stem(5)));
        assert!(!Stem(0).combines_with(Stem(6)));
        assert!(Branch(2).harmonizes_with(Branch(11)));
        assert!(Branch(6).harmonizes_with(Branch(7)));
        assert!(Branch(0).clashes_with(Branch(6)));
        assert_eq!(Branch(0).peach_blossom(), Branch(9));
        assert_eq!(Branch(11).peach_blossom(), Branch(0));
    }

    #[test]
    fn sexagenary_index_and_empty_branches() {
        assert_eq!(sexagenary_index(Stem(0), Branch(0)), Some(0));
        assert_eq!(sexagenary_index(Stem(0), Branch(10)), Some(10));
        assert_eq!(sexagenary_index(Stem(9), Branch(11)), Some(59));
        assert_eq!(sexagenary_index(Stem(0), Branch(1)), None);
        // 甲子 decade leaves 戌亥 empty.
        assert_eq!(empty_branches(Stem(0), Branch(0)), Some([Branch(10), Branch(11)]));
        // 甲戌 decade leaves 申酉 empty.
        assert_eq!(empty_branches(Stem(0), Branch(10)), Some([Branch(8), Branch(9)]));
    }
}
