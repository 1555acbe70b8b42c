use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 单个 ID 或 ID 列表
///
/// 请求体中可以是 `1`、`"1"`、`[1, 2]`；query string 中可以是 `groups=1` 或 `groups=1,2`。
/// 反序列化时统一成列表，之后的代码只面对 `Vec<i64>`。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "common.ts")]
pub struct IdList(pub Vec<i64>);

impl IdList {
    pub fn into_vec(self) -> Vec<i64> {
        self.0
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<i64>> for IdList {
    fn from(ids: Vec<i64>) -> Self {
        IdList(ids)
    }
}

impl From<i64> for IdList {
    fn from(id: i64) -> Self {
        IdList(vec![id])
    }
}

fn parse_id<E: serde::de::Error>(raw: &str) -> Result<i64, E> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| E::custom(format!("invalid id: '{raw}'")))
}

fn u64_to_id<E: serde::de::Error>(value: u64) -> Result<i64, E> {
    i64::try_from(value).map_err(|_| E::custom(format!("id out of range: {value}")))
}

// 列表里的单个元素：数字或数字字符串
struct IdElement(i64);

impl<'de> Deserialize<'de> for IdElement {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct ElementVisitor;

        impl<'de> serde::de::Visitor<'de> for ElementVisitor {
            type Value = IdElement;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("an integer id")
            }

            fn visit_i64<E: serde::de::Error>(self, value: i64) -> Result<Self::Value, E> {
                Ok(IdElement(value))
            }

            fn visit_u64<E: serde::de::Error>(self, value: u64) -> Result<Self::Value, E> {
                u64_to_id(value).map(IdElement)
            }

            fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<Self::Value, E> {
                parse_id(value).map(IdElement)
            }
        }

        deserializer.deserialize_any(ElementVisitor)
    }
}

struct IdListVisitor;

impl<'de> serde::de::Visitor<'de> for IdListVisitor {
    type Value = IdList;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("an id, a comma separated list of ids or an array of ids")
    }

    fn visit_i64<E: serde::de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(IdList(vec![value]))
    }

    fn visit_u64<E: serde::de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(IdList(vec![u64_to_id(value)?]))
    }

    fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<Self::Value, E> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(IdList::default());
        }
        value
            .split(',')
            .map(parse_id)
            .collect::<Result<Vec<_>, E>>()
            .map(IdList)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut ids = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(IdElement(id)) = seq.next_element()? {
            ids.push(id);
        }
        Ok(IdList(ids))
    }
}

impl<'de> Deserialize<'de> for IdList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(IdListVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Body {
        groups: IdList,
    }

    #[derive(Deserialize)]
    struct Query {
        groups: Option<IdList>,
    }

    #[test]
    fn test_scalar_becomes_single_element_list() {
        let body: Body = serde_json::from_str(r#"{"groups": 7}"#).unwrap();
        assert_eq!(body.groups, IdList(vec![7]));
    }

    #[test]
    fn test_array_of_numbers_and_strings() {
        let body: Body = serde_json::from_str(r#"{"groups": [1, "2", 3]}"#).unwrap();
        assert_eq!(body.groups.into_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_string_forms() {
        let body: Body = serde_json::from_str(r#"{"groups": "4"}"#).unwrap();
        assert_eq!(body.groups.as_slice(), &[4]);

        let body: Body = serde_json::from_str(r#"{"groups": "4, 5"}"#).unwrap();
        assert_eq!(body.groups.as_slice(), &[4, 5]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let body: Body = serde_json::from_str(r#"{"groups": [2, 2]}"#).unwrap();
        assert_eq!(body.groups.len(), 2);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(serde_json::from_str::<Body>(r#"{"groups": "abc"}"#).is_err());
        assert!(serde_json::from_str::<Body>(r#"{"groups": [1, "x"]}"#).is_err());
        assert!(serde_json::from_str::<Body>(r#"{"groups": -1.5}"#).is_err());
    }

    #[test]
    fn test_optional_missing() {
        let query: Query = serde_json::from_str("{}").unwrap();
        assert!(query.groups.is_none());
    }
}
