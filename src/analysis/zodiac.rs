use crate::profile::{Element, Placement};

/// Zodiac sign index (0–11). Order: Aries=0 .. Pisces=11.
pub fn sign_index(sign: &str) -> Option<u8> {
    let idx = match sign.trim().to_lowercase().as_str() {
        "aries" => 0,
        "taurus" => 1,
        "gemini" => 2,
        "cancer" => 3,
        "leo" => 4,
        "virgo" => 5,
        "libra" => 6,
        "scorpio" => 7,
        "sagittarius" => 8,
        "capricorn" => 9,
        "aquarius" => 10,
        "pisces" => 11,
        _ => return None,
    };
    Some(idx)
}

pub fn sign_name(index: u8) -> &'static str {
    const NAMES: [&str; 12] = [
        "aries",
        "taurus",
        "gemini",
        "cancer",
        "leo",
        "virgo",
        "libra",
        "scorpio",
        "sagittarius",
        "capricorn",
        "aquarius",
        "pisces",
    ];
    NAMES[usize::from(index % 12)]
}

pub fn placement_index(placement: &Placement) -> Option<u8> {
    sign_index(&placement.sign)
}

/// Whole-sign aspect between two placements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aspect {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
    Minor,
}

impl Aspect {
    /// `None` when either sign is outside the twelve-sign wheel.
    pub fn between(a: &Placement, b: &Placement) -> Option<Self> {
        let distance = aspect_distance(placement_index(a)?, placement_index(b)?);
        Some(match distance {
            0 => Aspect::Conjunction,
            2 => Aspect::Sextile,
            3 => Aspect::Square,
            4 => Aspect::Trine,
            6 => Aspect::Opposition,
            _ => Aspect::Minor,
        })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Aspect::Conjunction => "conjunct",
            Aspect::Sextile => "sextile",
            Aspect::Square => "square",
            Aspect::Trine => "trine",
            Aspect::Opposition => "opposite",
            Aspect::Minor => "minor aspect to",
        }
    }

    pub fn is_harmonious(&self) -> bool {
        matches!(self, Aspect::Sextile | Aspect::Trine)
    }

    pub fn is_tense(&self) -> bool {
        matches!(self, Aspect::Square | Aspect::Opposition)
    }

    /// Rough weight of the aspect on a 0–100 harmony scale.
    pub fn score(&self) -> f64 {
        match self {
            Aspect::Conjunction => 85.0,
            Aspect::Trine => 90.0,
            Aspect::Sextile => 80.0,
            Aspect::Minor => 60.0,
            Aspect::Opposition => 50.0,
            Aspect::Square => 40.0,
        }
    }
}

/// Aspect distance in signs: 0 = conj, 2 = sextile, 3 = square, 4 = trine, 6 = opposition.
pub fn aspect_distance(a: u8, b: u8) -> u8 {
    let d = a.abs_diff(b);
    if d <= 6 { d } else { 12 - d }
}

/// Shorter-arc midpoint of two sign indices.
pub fn midpoint(a: u8, b: u8) -> u8 {
    let forward = (b + 12 - a) % 12;
    if forward <= 6 {
        (a + forward / 2) % 12
    } else {
        (b + (12 - forward) / 2) % 12
    }
}

/// Harmony of two classical elements on a 0–100 scale.
pub fn element_harmony(a: Element, b: Element) -> f64 {
    use Element::*;
    match (a, b) {
        _ if a == b => 90.0,
        (Fire, Air) | (Air, Fire) | (Earth, Water) | (Water, Earth) => 80.0,
        (Fire, Water) | (Water, Fire) | (Earth, Air) | (Air, Earth) => 45.0,
        _ => 60.0,
    }
}
