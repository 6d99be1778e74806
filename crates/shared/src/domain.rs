use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Ids are opaque strings on the client side. The server keys its tables with
/// integers, so both JSON numbers and strings are accepted when decoding.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

impl From<RawId> for String {
    fn from(value: RawId) -> Self {
        match value {
            RawId::Number(n) => n.to_string(),
            RawId::Text(s) => s,
        }
    }
}

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Maps a raw dropdown value to a selection; `""` means nothing is selected.
            pub fn from_selection(value: &str) -> Option<Self> {
                let value = value.trim();
                if value.is_empty() {
                    None
                } else {
                    Some(Self(value.to_string()))
                }
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                RawId::deserialize(deserializer).map(|raw| Self(raw.into()))
            }
        }
    };
}

id_newtype!(ChargerTypeId);
id_newtype!(SowId);
id_newtype!(CustomerId);
