//! Domain DTOs for the superhero API.
//!
//! # Design
//! Field names follow Rust conventions; serde attributes map them onto the
//! wire format. Three quirks of the upstream format are handled here:
//! the image URL is nested as `image.url`, the biography uses the hyphenated
//! key `full-name`, and power stats arrive as text that may be a placeholder
//! such as `"null"`. Stats decode to integers with a fallback of `0`; a
//! missing stat key is still a decode error.
//!
//! The mock-server crate defines its own wire structs; integration tests catch
//! drift between the two.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Response to a name search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    #[serde(rename = "response")]
    pub status: String,
    pub results: Vec<HeroSummary>,
}

/// Minimal hero record returned by search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HeroSummary {
    pub id: String,
    pub name: String,
    #[serde(rename = "image", with = "image_url")]
    pub image_url: String,
}

/// Full hero record returned by lookup-by-id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HeroDetail {
    pub id: String,
    pub name: String,
    #[serde(rename = "image", with = "image_url")]
    pub image_url: String,
    #[serde(rename = "powerstats")]
    pub power_stats: PowerStats,
    pub biography: Biography,
    pub work: Work,
}

impl HeroDetail {
    pub fn role(&self) -> Role {
        self.biography.role()
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PowerStats {
    #[serde(deserialize_with = "stat_value")]
    pub intelligence: u32,
    #[serde(deserialize_with = "stat_value")]
    pub strength: u32,
    #[serde(deserialize_with = "stat_value")]
    pub speed: u32,
    #[serde(deserialize_with = "stat_value")]
    pub durability: u32,
    #[serde(deserialize_with = "stat_value")]
    pub power: u32,
    #[serde(deserialize_with = "stat_value")]
    pub combat: u32,
}

/// Upper end of the scale stats are displayed against.
pub const STAT_SCALE: u32 = 100;

impl PowerStats {
    pub fn get(&self, kind: StatKind) -> u32 {
        match kind {
            StatKind::Intelligence => self.intelligence,
            StatKind::Strength => self.strength,
            StatKind::Speed => self.speed,
            StatKind::Durability => self.durability,
            StatKind::Power => self.power,
            StatKind::Combat => self.combat,
        }
    }

    /// Stats in display order.
    pub fn iter(&self) -> impl Iterator<Item = (StatKind, u32)> + '_ {
        StatKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }

    /// Sum of all six stats. Widened so unclamped upstream values cannot overflow.
    pub fn total(&self) -> u64 {
        self.iter().map(|(_, v)| u64::from(v)).sum()
    }

    /// Value as a fraction of `STAT_SCALE`, clamped to `[0.0, 1.0]`.
    pub fn fraction(&self, kind: StatKind) -> f64 {
        (f64::from(self.get(kind)) / f64::from(STAT_SCALE)).clamp(0.0, 1.0)
    }
}

/// The six power stats, in the order they are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatKind {
    Intelligence,
    Strength,
    Speed,
    Durability,
    Power,
    Combat,
}

impl StatKind {
    pub const ALL: [StatKind; 6] = [
        StatKind::Intelligence,
        StatKind::Strength,
        StatKind::Speed,
        StatKind::Durability,
        StatKind::Power,
        StatKind::Combat,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StatKind::Intelligence => "Intelligence",
            StatKind::Strength => "Strength",
            StatKind::Speed => "Speed",
            StatKind::Durability => "Durability",
            StatKind::Power => "Power",
            StatKind::Combat => "Combat",
        }
    }

    pub fn abbreviation(self) -> &'static str {
        match self {
            StatKind::Intelligence => "Int",
            StatKind::Strength => "Str",
            StatKind::Speed => "Spd",
            StatKind::Durability => "Dur",
            StatKind::Power => "Pow",
            StatKind::Combat => "Cbt",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Biography {
    #[serde(rename = "full-name")]
    pub full_name: String,
    pub aliases: Vec<String>,
    pub publisher: String,
    pub alignment: String,
}

/// Placeholder the upstream uses for "no value".
const PLACEHOLDER: &str = "-";

impl Biography {
    pub fn role(&self) -> Role {
        Role::from_alignment(&self.alignment)
    }

    /// Aliases in server order, minus `"-"` placeholders and blanks.
    pub fn display_aliases(&self) -> impl Iterator<Item = &str> {
        self.aliases
            .iter()
            .map(|a| a.trim())
            .filter(|a| !a.is_empty() && *a != PLACEHOLDER)
    }

    pub fn has_aliases(&self) -> bool {
        self.display_aliases().next().is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Work {
    pub occupation: String,
    pub base: String,
}

/// How a hero is presented, derived from `Biography::alignment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Hero,
    Villain,
    Neutral,
}

impl Role {
    /// `"good"` is a hero, `"bad"` a villain, anything else neutral.
    pub fn from_alignment(alignment: &str) -> Self {
        let alignment = alignment.trim();
        if alignment.eq_ignore_ascii_case("good") {
            Role::Hero
        } else if alignment.eq_ignore_ascii_case("bad") {
            Role::Villain
        } else {
            Role::Neutral
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Hero => "hero",
            Role::Villain => "villain",
            Role::Neutral => "neutral",
        })
    }
}

/// `image: { "url": ... }` on the wire, a flat `String` in the model.
mod image_url {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Image<S> {
        url: S,
    }

    pub fn serialize<S: Serializer>(url: &str, serializer: S) -> Result<S::Ok, S::Error> {
        Image { url }.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Image::<String>::deserialize(deserializer).map(|image| image.url)
    }
}

/// Accepts `"87"`, `87`, `"null"` or `null`; anything non-numeric becomes 0.
fn stat_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
        Missing(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text.trim().parse().unwrap_or(0),
        Raw::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()).unwrap_or(0),
        Raw::Missing(()) => 0,
    })
}
