use serde::{Deserialize, Deserializer};

// clients send category ids both as "4" and as 4, storage keeps them as text
pub fn deserialize_option_string_from_number<'de, D>(
    deserializer: D,
) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Integer(i64),
    }

    match Option::<StringOrNumber>::deserialize(deserializer)? {
        Some(StringOrNumber::String(s)) => Ok(Some(s)),
        Some(StringOrNumber::Integer(n)) => Ok(Some(n.to_string())),
        None => Ok(None),
    }
}

/// Question id that may arrive as a JSON number or a numeric string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "IdRepr")]
pub struct LenientId(pub i64);

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Integer(i64),
    String(String),
}

impl TryFrom<IdRepr> for LenientId {
    type Error = String;

    fn try_from(value: IdRepr) -> Result<Self, Self::Error> {
        match value {
            IdRepr::Integer(v) => Ok(LenientId(v)),
            IdRepr::String(s) => match s.trim().parse::<i64>() {
                Ok(v) => Ok(LenientId(v)),
                Err(_) => Err(format!("Wrong value {s}, can not parse to i64")),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Body {
        #[serde(default, deserialize_with = "deserialize_option_string_from_number")]
        category: Option<String>,
        #[serde(default)]
        ids: Vec<LenientId>,
    }

    #[test]
    fn category_accepts_strings_and_numbers() {
        let body: Body = serde_json::from_str(r#"{"category": 4}"#).unwrap();
        assert_eq!(body.category.as_deref(), Some("4"));
        let body: Body = serde_json::from_str(r#"{"category": "4"}"#).unwrap();
        assert_eq!(body.category.as_deref(), Some("4"));
        let body: Body = serde_json::from_str(r#"{"category": null}"#).unwrap();
        assert_eq!(body.category, None);
        let body: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(body.category, None);
    }

    #[test]
    fn category_rejects_booleans() {
        assert!(serde_json::from_str::<Body>(r#"{"category": true}"#).is_err());
    }

    #[test]
    fn ids_accept_numbers_and_numeric_strings() {
        let body: Body = serde_json::from_str(r#"{"ids": [1, "2", " 3 "]}"#).unwrap();
        assert_eq!(body.ids, vec![LenientId(1), LenientId(2), LenientId(3)]);
        assert!(serde_json::from_str::<Body>(r#"{"ids": ["two"]}"#).is_err());
    }
}
