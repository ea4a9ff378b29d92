//! Strongly-typed identifier value objects.
//!
//! Every identifier wraps a UUID. The nil UUID is representable (it arrives
//! over the wire from other services) but aggregates reject it where a real
//! reference is required.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            #[doc = concat!("Creates a new random ", stringify!($name), ".")]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            #[doc = concat!("Creates a ", stringify!($name), " from an existing UUID.")]
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// The nil identifier, used by peers to signal "no reference".
            pub fn nil() -> Self {
                Self(Uuid::nil())
            }

            /// Returns true for the nil identifier.
            pub fn is_nil(&self) -> bool {
                self.0.is_nil()
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

uuid_id!(
    /// Unique identifier for a player profile.
    PlayerId
);

uuid_id!(
    /// Identity of the user account embedded in a player profile.
    UserId
);

uuid_id!(
    /// Unique identifier for a workout session.
    WorkoutId
);

uuid_id!(
    /// Unique identifier for a trail.
    TrailId
);

uuid_id!(
    /// Unique identifier for a shelter on a trail.
    ShelterId
);

uuid_id!(
    /// Identifier of a heart-rate monitor device.
    HrmId
);

uuid_id!(
    /// Geographic zone a player belongs to.
    ZoneId
);

uuid_id!(
    /// Unique identifier for a stored heart-rate reading.
    ReadingId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_id_generates_unique_values() {
        let id1 = PlayerId::new();
        let id2 = PlayerId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn workout_id_parses_from_valid_string() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: WorkoutId = uuid_str.parse().unwrap();
        assert_eq!(id.to_string(), uuid_str);
    }

    #[test]
    fn nil_id_is_detected() {
        assert!(PlayerId::nil().is_nil());
        assert!(!PlayerId::new().is_nil());
    }

    #[test]
    fn nil_id_parses_from_wire_format() {
        let id: HrmId = "00000000-0000-0000-0000-000000000000".parse().unwrap();
        assert!(id.is_nil());
    }

    #[test]
    fn ids_serialize_transparently() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: TrailId = uuid_str.parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid_str));
    }

    #[test]
    fn invalid_string_is_rejected() {
        assert!("not-a-uuid".parse::<ShelterId>().is_err());
    }
}
