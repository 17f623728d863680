//! Newtype IDs for type-safe identifiers.
//!
//! Catalog rows are keyed by integers, so every ID wraps an `i64` and parses
//! from the numeric tail of a URL segment. Carts are the exception: anonymous
//! carts are handed out as random tokens.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CommerceError;

/// Macro to generate integer newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A unique identifier.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create a new ID from its numeric value.
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the numeric value.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl FromStr for $name {
            type Err = CommerceError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<i64>()
                    .map(Self)
                    .map_err(|_| CommerceError::InvalidIdentifier(s.to_string()))
            }
        }
    };
}

define_id!(ProductId);
define_id!(VariantId);
define_id!(CategoryId);
define_id!(AttributeId);
define_id!(AttributeValueId);
define_id!(ImageId);
define_id!(SaleId);
define_id!(UserId);

/// Token identifying a cart across requests of an anonymous session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartToken(uuid::Uuid);

impl CartToken {
    /// Generate a fresh random token.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl fmt::Display for CartToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CartToken {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| CommerceError::InvalidIdentifier(s.to_string()))
    }
}
