/// ID types for Chorus entities
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[cfg(feature = "sqlx")]
use sqlx::{
    encode::IsNull,
    error::BoxDynError,
    sqlite::{SqliteArgumentValue, SqliteTypeInfo, SqliteValueRef},
    Decode, Encode, Sqlite, Type,
};

/// Declares a string-backed identifier whose generated values carry `$prefix`.
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing identifier
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a new random identifier
            pub fn generate() -> Self {
                Self(format!("{}-{}", $prefix, Uuid::new_v4().simple()))
            }

            /// Get the inner string
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        #[cfg(feature = "sqlx")]
        impl Type<Sqlite> for $name {
            fn type_info() -> SqliteTypeInfo {
                <String as Type<Sqlite>>::type_info()
            }
        }

        #[cfg(feature = "sqlx")]
        impl<'q> Encode<'q, Sqlite> for $name {
            fn encode_by_ref(
                &self,
                args: &mut Vec<SqliteArgumentValue<'q>>,
            ) -> Result<IsNull, BoxDynError> {
                <String as Encode<Sqlite>>::encode_by_ref(&self.0, args)
            }
        }

        #[cfg(feature = "sqlx")]
        impl<'r> Decode<'r, Sqlite> for $name {
            fn decode(value: SqliteValueRef<'r>) -> Result<Self, BoxDynError> {
                let s = <String as Decode<Sqlite>>::decode(value)?;
                Ok($name(s))
            }
        }
    };
}

entity_id!(
    /// User identifier
    UserId,
    "user"
);

entity_id!(
    /// Album identifier
    AlbumId,
    "album"
);

entity_id!(
    /// Song identifier
    SongId,
    "song"
);

entity_id!(
    /// Playlist identifier
    PlaylistId,
    "playlist"
);

entity_id!(
    /// Identifier of a song's membership in a playlist
    PlaylistSongId,
    "playlist-song"
);

entity_id!(
    /// Album like identifier
    LikeId,
    "like"
);

entity_id!(
    /// Collaboration identifier
    CollaborationId,
    "collab"
);

entity_id!(
    /// Playlist activity identifier
    ActivityId,
    "activity"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let id1 = UserId::generate();
        let id2 = UserId::generate();
        assert_ne!(id1, id2);
    }

    #[test]
    fn generated_ids_carry_their_kind() {
        assert!(AlbumId::generate().as_str().starts_with("album-"));
        assert!(LikeId::generate().as_str().starts_with("like-"));
        assert!(PlaylistSongId::generate()
            .as_str()
            .starts_with("playlist-song-"));
    }

    #[test]
    fn playlist_id_display() {
        let id = PlaylistId::new("playlist-456");
        assert_eq!(format!("{}", id), "playlist-456");
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let json = serde_json::to_string(&SongId::new("song-1")).unwrap();
        assert_eq!(json, "\"song-1\"");
    }
}
