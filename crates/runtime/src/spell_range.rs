//! Range of a champion or summoner spell
//!
//! The api sends the range as the string `"self"` for self-targeted spells,
//! and as a list of per-rank ranges otherwise. Older data versions wrap the
//! list in an object.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpellRange {
    pub is_self: bool,
    pub ranges: Vec<i32>,
}

impl SpellRange {
    pub fn self_targeted() -> Self {
        SpellRange {
            is_self: true,
            ranges: Vec::new(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Repr {
    Keyword(String),
    Ranges(Vec<i32>),
    Wrapped {
        #[serde(rename = "Ranges", default)]
        ranges: Vec<i32>,
    },
}

impl<'de> Deserialize<'de> for SpellRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Keyword(keyword) if keyword == "self" => Ok(SpellRange::self_targeted()),
            Repr::Keyword(keyword) => Err(de::Error::custom(format!(
                "unexpected spell range \"{keyword}\""
            ))),
            Repr::Ranges(ranges) | Repr::Wrapped { ranges } => Ok(SpellRange {
                is_self: false,
                ranges,
            }),
        }
    }
}

impl Serialize for SpellRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_self {
            serializer.serialize_str("self")
        } else {
            self.ranges.serialize(serializer)
        }
    }
}
