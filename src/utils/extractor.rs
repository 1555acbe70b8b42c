use actix_web::{
    FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError, web,
};
use futures_util::future::{Ready, ready};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use crate::models::{ApiResponse, ErrorCode};

/// 路径参数 `{id}` 的安全解析，非正整数直接返回 400
#[derive(Debug, Clone, Copy)]
pub struct SafeIDI64(pub i64);

fn parse_path_id(req: &HttpRequest, name: &str) -> Result<i64, actix_web::Error> {
    let raw = req.match_info().get(name).unwrap_or_default();
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => {
            let response = HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
                ErrorCode::BadRequest,
                format!("Invalid path parameter '{name}': '{raw}'"),
            ));
            Err(InternalError::from_response(format!("invalid {name}"), response).into())
        }
    }
}

impl FromRequest for SafeIDI64 {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse_path_id(req, "id").map(SafeIDI64))
    }
}

/// 声明哪些查询键可以重复出现
pub trait RepeatableKeys {
    const REPEATABLE: &'static [&'static str];
}

/// 支持重复键的查询参数提取器
///
/// `groups=1&groups=2`、`groups[]=1&groups[]=2` 与 `groups=1,2` 等价。
/// 只有 `T::REPEATABLE` 中的键可以重复，其余键重复时返回 400。
#[derive(Debug)]
pub struct ListQuery<T>(pub T);

impl<T> ListQuery<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

/// 把查询字符串解析为 `T`，重复的列表键按逗号合并
pub fn decode_list_query<T>(query: &str) -> Result<T, String>
where
    T: DeserializeOwned + RepeatableKeys,
{
    let pairs = web::Query::<Vec<(String, String)>>::from_query(query)
        .map_err(|e| e.to_string())?
        .into_inner();

    let mut merged = Map::new();
    for (key, value) in pairs {
        let key = key.strip_suffix("[]").unwrap_or(&key).to_string();
        let repeatable = T::REPEATABLE.contains(&key.as_str());

        match merged.get_mut(&key) {
            None => {
                merged.insert(key, Value::String(value));
            }
            Some(Value::String(existing)) if repeatable => {
                if value.trim().is_empty() {
                    continue;
                }
                if !existing.trim().is_empty() {
                    existing.push(',');
                }
                existing.push_str(&value);
            }
            Some(_) => return Err(format!("duplicate field `{key}`")),
        }
    }

    serde_json::from_value(Value::Object(merged)).map_err(|e| e.to_string())
}

impl<T> FromRequest for ListQuery<T>
where
    T: DeserializeOwned + RepeatableKeys,
{
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result: Result<Self, actix_web::Error> = decode_list_query::<T>(req.query_string())
            .map(ListQuery)
            .map_err(|err| {
                debug!("Query string error on {}: {}", req.path(), err);
                let response = HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
                    ErrorCode::BadRequest,
                    format!("Invalid query parameters: {err}"),
                ));
                InternalError::from_response(err, response).into()
            });
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Filter {
        name: Option<String>,
        ids: Option<String>,
    }

    impl RepeatableKeys for Filter {
        const REPEATABLE: &'static [&'static str] = &["ids"];
    }

    #[test]
    fn test_repeated_keys_are_joined() {
        let filter: Filter = decode_list_query("ids=1&ids=2&name=x").unwrap();
        assert_eq!(filter.ids.as_deref(), Some("1,2"));
        assert_eq!(filter.name.as_deref(), Some("x"));

        let filter: Filter = decode_list_query("ids%5B%5D=3&ids%5B%5D=4,5").unwrap();
        assert_eq!(filter.ids.as_deref(), Some("3,4,5"));

        let filter: Filter = decode_list_query("ids=&ids=7").unwrap();
        assert_eq!(filter.ids.as_deref(), Some("7"));
    }

    #[test]
    fn test_repeated_scalar_key_is_rejected() {
        let err = decode_list_query::<Filter>("name=a&name=b").unwrap_err();
        assert!(err.contains("name"));
    }
}
