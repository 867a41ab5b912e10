use serde::{Deserialize, Deserializer};

/// Reads `?page=N`. A missing or non-integer value means the first page, the
/// same as an explicit `page=1`.
pub fn deserialize_page<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(1))
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "first_page", deserialize_with = "deserialize_page")]
    pub page: i64,
}

fn first_page() -> i64 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> i64 {
        serde_json::from_value::<PageQuery>(value).unwrap().page
    }

    #[test]
    fn page_defaults_to_one() {
        assert_eq!(parse(json!({})), 1);
        assert_eq!(parse(json!({ "page": "abc" })), 1);
        assert_eq!(parse(json!({ "page": "" })), 1);
    }

    #[test]
    fn page_is_read_as_integer() {
        assert_eq!(parse(json!({ "page": "3" })), 3);
        assert_eq!(parse(json!({ "page": "-2" })), -2);
    }
}
