//! Strongly typed identifiers.
//!
//! Every aggregate is keyed by an opaque string id. Fresh ids are UUID v4,
//! but any string is accepted so ids from configuration files (director ids
//! such as `"socrates"`) round-trip unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a fresh random id
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
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

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

define_id!(
    /// Identity of a meeting
    MeetingId
);
define_id!(
    /// Identity of a director persona
    DirectorId
);
define_id!(
    /// Identity of a persisted statement
    StatementId
);
define_id!(
    /// Identity of a user question
    QuestionId
);
