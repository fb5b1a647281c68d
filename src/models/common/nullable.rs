use serde::{Deserialize, Deserializer};

/// 区分“未提供”与“显式置空”的可空字段
///
/// 配合 `#[serde(default, deserialize_with = "deserialize_nullable")]` 使用：
/// - 字段缺失 → `None`（保持原值）
/// - `null` → `Some(None)`（清空）
/// - 具体值 → `Some(Some(v))`
pub fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "deserialize_nullable")]
        room: Option<Option<String>>,
    }

    #[test]
    fn test_missing_null_and_value_are_distinct() {
        let missing: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.room, None);

        let cleared: Patch = serde_json::from_str(r#"{"room":null}"#).unwrap();
        assert_eq!(cleared.room, Some(None));

        let set: Patch = serde_json::from_str(r#"{"room":"Lab 2"}"#).unwrap();
        assert_eq!(set.room, Some(Some("Lab 2".to_string())));
    }
}
