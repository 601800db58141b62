use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::is_falsy;

const DEFAULT_SIGN: &str = "aries";

/// Classical element of a zodiac sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

impl Element {
    pub fn as_str(&self) -> &'static str {
        match self {
            Element::Fire => "fire",
            Element::Earth => "earth",
            Element::Air => "air",
            Element::Water => "water",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive sign lookup. Unknown signs are treated as fire.
pub fn element_from_sign(sign: &str) -> Element {
    match sign.trim().to_lowercase().as_str() {
        "taurus" | "virgo" | "capricorn" => Element::Earth,
        "gemini" | "libra" | "aquarius" => Element::Air,
        "cancer" | "scorpio" | "pisces" => Element::Water,
        _ => Element::Fire,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub sign: String,
    pub element: Element,
}

impl Placement {
    pub fn from_sign(sign: &str) -> Self {
        let sign = sign.trim().to_lowercase();
        let element = element_from_sign(&sign);
        Self { sign, element }
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::from_sign(DEFAULT_SIGN)
    }
}

/// Natal points tracked on a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Point {
    Sun,
    Moon,
    Venus,
    Mars,
    Mercury,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    NorthNode,
    SouthNode,
    Ascendant,
}

impl Point {
    pub fn key(&self) -> &'static str {
        match self {
            Point::Sun => "sun",
            Point::Moon => "moon",
            Point::Venus => "venus",
            Point::Mars => "mars",
            Point::Mercury => "mercury",
            Point::Jupiter => "jupiter",
            Point::Saturn => "saturn",
            Point::Uranus => "uranus",
            Point::Neptune => "neptune",
            Point::Pluto => "pluto",
            Point::NorthNode => "northNode",
            Point::SouthNode => "southNode",
            Point::Ascendant => "ascendant",
        }
    }

    /// Names accepted in planet arrays, compared case-insensitively.
    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Point::NorthNode => &["northnode", "north node", "north_node", "true node"],
            Point::SouthNode => &["southnode", "south node", "south_node"],
            Point::Ascendant => &["ascendant", "asc", "rising"],
            _ => &[],
        }
    }

    fn matches_name(&self, name: &str) -> bool {
        let name = name.trim();
        name.eq_ignore_ascii_case(self.key())
            || self
                .aliases()
                .iter()
                .any(|alias| name.eq_ignore_ascii_case(alias))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AstrologyProfile {
    pub sun: Placement,
    pub moon: Placement,
    pub venus: Placement,
    pub mars: Placement,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mercury: Option<Placement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jupiter: Option<Placement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturn: Option<Placement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uranus: Option<Placement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neptune: Option<Placement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pluto: Option<Placement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub north_node: Option<Placement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub south_node: Option<Placement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ascendant: Option<Placement>,
}

impl AstrologyProfile {
    pub fn placement(&self, point: Point) -> Option<&Placement> {
        match point {
            Point::Sun => Some(&self.sun),
            Point::Moon => Some(&self.moon),
            Point::Venus => Some(&self.venus),
            Point::Mars => Some(&self.mars),
            Point::Mercury => self.mercury.as_ref(),
            Point::Jupiter => self.jupiter.as_ref(),
            Point::Saturn => self.saturn.as_ref(),
            Point::Uranus => self.uranus.as_ref(),
            Point::Neptune => self.neptune.as_ref(),
            Point::Pluto => self.pluto.as_ref(),
            Point::NorthNode => self.north_node.as_ref(),
            Point::SouthNode => self.south_node.as_ref(),
            Point::Ascendant => self.ascendant.as_ref(),
        }
    }
}

/// Build a canonical astrology profile, or `None` when there is no record at all.
///
/// Every point except the ascendant is guaranteed to be populated; missing points
/// default to aries/fire. A missing ascendant stays `None`.
pub fn build_astro_profile(raw: Option<&Value>) -> Option<AstrologyProfile> {
    if is_falsy(raw) {
        return None;
    }
    let raw = raw?;

    let resolved = |point: Point| resolve_sign(raw, point).map(|sign| Placement::from_sign(&sign));
    let required = |point: Point| resolved(point).unwrap_or_default();

    Some(AstrologyProfile {
        sun: required(Point::Sun),
        moon: required(Point::Moon),
        venus: required(Point::Venus),
        mars: required(Point::Mars),
        mercury: Some(required(Point::Mercury)),
        jupiter: Some(required(Point::Jupiter)),
        saturn: Some(required(Point::Saturn)),
        uranus: Some(required(Point::Uranus)),
        neptune: Some(required(Point::Neptune)),
        pluto: Some(required(Point::Pluto)),
        north_node: Some(required(Point::NorthNode)),
        south_node: Some(required(Point::SouthNode)),
        ascendant: resolved(Point::Ascendant),
    })
}

fn resolve_sign(raw: &Value, point: Point) -> Option<String> {
    let planets = raw.get("planets");
    planets
        .and_then(Value::as_array)
        .and_then(|list| sign_from_planet_list(list, point))
        .or_else(|| {
            planets
                .and_then(Value::as_object)
                .and_then(|map| sign_from_planet_map(map, point))
        })
        .or_else(|| sign_of(raw.get(point.key())))
}

fn sign_from_planet_list(list: &[Value], point: Point) -> Option<String> {
    list.iter()
        .find(|entry| {
            entry
                .get("name")
                .and_then(Value::as_str)
                .is_some_and(|name| point.matches_name(name))
        })
        .and_then(|entry| sign_of(Some(entry)))
}

fn sign_from_planet_map(map: &Map<String, Value>, point: Point) -> Option<String> {
    sign_of(map.get(point.key()))
}

/// A sign is either a bare string or the `sign` field of an object.
fn sign_of(value: Option<&Value>) -> Option<String> {
    let sign = match value? {
        Value::String(s) => s.as_str(),
        Value::Object(map) => map.get("sign")?.as_str()?,
        _ => return None,
    };
    let sign = sign.trim();
    (!sign.is_empty()).then(|| sign.to_lowercase())
}
