//! Wire and storage models

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A persisted user row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
}

/// Request body shared by create, update and delete.
///
/// Decoding is lenient in the same places the original service's decoder
/// was: a top-level `null` is an empty payload, `null` or a missing `name`
/// is the empty string, keys match case-insensitively and unknown keys are
/// ignored. Only uniqueness is enforced, and only by storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPayload {
    pub name: String,
}

impl<'de> Deserialize<'de> for UserPayload {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(fields) = Option::<Map<String, Value>>::deserialize(deserializer)? else {
            return Ok(Self::default());
        };

        let mut payload = Self::default();
        for (key, value) in fields {
            match key.to_lowercase().as_str() {
                "name" => {
                    payload.name = Option::<String>::deserialize(value)
                        .map_err(<D::Error as de::Error>::custom)?
                        .unwrap_or_default();
                }
                // Never used, but still has to be an integer.
                "id" => {
                    Option::<i32>::deserialize(value).map_err(<D::Error as de::Error>::custom)?;
                }
                _ => {}
            }
        }
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<UserPayload, serde_json::Error> {
        serde_json::from_str(body)
    }

    #[test]
    fn user_serializes_id_and_name() {
        let user = User {
            id: 7,
            name: "alice".into(),
        };
        assert_eq!(
            serde_json::to_string(&user).unwrap(),
            r#"{"id":7,"name":"alice"}"#
        );
    }

    #[test]
    fn payload_defaults_missing_or_null_name() {
        assert_eq!(parse("{}").unwrap().name, "");
        assert_eq!(parse(r#"{"name":null}"#).unwrap().name, "");
        assert_eq!(parse("null").unwrap(), UserPayload::default());
    }

    #[test]
    fn payload_keys_are_case_insensitive() {
        assert_eq!(parse(r#"{"Name":"bob"}"#).unwrap().name, "bob");
        assert_eq!(parse(r#"{"NAME":"bob"}"#).unwrap().name, "bob");
        assert_eq!(parse(r#"{"nAmE":"bob","ID":3}"#).unwrap().name, "bob");
    }

    #[test]
    fn payload_ignores_unknown_keys() {
        assert_eq!(parse(r#"{"name":"bob","age":3}"#).unwrap().name, "bob");
    }

    #[test]
    fn payload_rejects_wrong_types() {
        assert!(parse(r#"{"name": 5}"#).is_err());
        assert!(parse(r#"{"id": "x"}"#).is_err());
        assert!(parse(r#"{"id": 1.5}"#).is_err());
        assert!(parse("[]").is_err());
        assert!(parse("\"alice\"").is_err());
    }
}
