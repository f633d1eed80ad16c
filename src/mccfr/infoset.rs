use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::mccfr::path::Path;

/// identifies an information set: the bucket the acting player's hand
/// falls into, plus the action history since the last deal. two physical
/// game states with the same bucket and history are treated as the same
/// decision point, which is the entire point of the abstraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InfoSetKey {
    pub bucket: u16,
    pub history: u64,
}

impl InfoSetKey {
    pub fn new(bucket: u16, history: Path) -> Self {
        Self { bucket, history: history.as_u64() }
    }
}

// serde_json map keys must serialize to strings, so `InfoSetKey` (used as a
// `HashMap` key throughout mccfr) round-trips through a "bucket:history"
// string representation rather than the derived struct form.
impl Serialize for InfoSetKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{}:{}", self.bucket, self.history))
    }
}

impl<'de> Deserialize<'de> for InfoSetKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct InfoSetKeyVisitor;

        impl<'de> Visitor<'de> for InfoSetKeyVisitor {
            type Value = InfoSetKey;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string of the form \"bucket:history\"")
            }

            fn visit_str<E>(self, value: &str) -> Result<InfoSetKey, E>
            where
                E: de::Error,
            {
                let (bucket, history) = value
                    .split_once(':')
                    .ok_or_else(|| de::Error::custom("expected \"bucket:history\""))?;
                let bucket = bucket.parse::<u16>().map_err(de::Error::custom)?;
                let history = history.parse::<u64>().map_err(de::Error::custom)?;
                Ok(InfoSetKey { bucket, history })
            }
        }

        deserializer.deserialize_str(InfoSetKeyVisitor)
    }
}
