use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Display language for every user-facing string. Only Korean is special-cased;
/// any other tag renders in English.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Locale {
    #[default]
    En,
    Ko,
}

impl Locale {
    pub fn parse(tag: &str) -> Self {
        let primary = tag.trim().split(['-', '_']).next().unwrap_or_default();
        if primary.eq_ignore_ascii_case("ko") {
            Locale::Ko
        } else {
            Locale::En
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ko => "ko",
        }
    }

    pub fn is_korean(&self) -> bool {
        matches!(self, Locale::Ko)
    }

    /// Pick between an English and a Korean literal.
    pub fn pick<'a>(&self, en: &'a str, ko: &'a str) -> &'a str {
        match self {
            Locale::En => en,
            Locale::Ko => ko,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Locale::parse(&tag))
    }
}
