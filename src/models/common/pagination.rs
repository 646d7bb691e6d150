use serde::Deserialize;
use ts_rs::TS;

/// 未指定 limit 时每页返回的条目数
pub const DEFAULT_LIMIT: u64 = 20;
/// 单页最大条目数
pub const MAX_LIMIT: u64 = 100;

// 分页查询参数（skip / limit 风格）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "pagination.ts")]
pub struct PaginationQuery {
    #[serde(default, deserialize_with = "deserialize_string_to_i64")]
    pub skip: i64,
    #[serde(default, deserialize_with = "deserialize_optional_string_to_i64")]
    pub limit: Option<i64>,
}

// 存储层使用的分页窗口，limit 为 None 时不限制条数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub skip: u64,
    pub limit: Option<u64>,
}

impl PaginationQuery {
    /// 规范化为分页窗口：skip 不小于 0，limit 限制在 1..=MAX_LIMIT
    pub fn window(&self) -> PageWindow {
        PageWindow {
            skip: self.skip.max(0) as u64,
            limit: Some(
                self.limit
                    .map(|l| l.max(1) as u64)
                    .unwrap_or(DEFAULT_LIMIT)
                    .min(MAX_LIMIT),
            ),
        }
    }
}

impl PageWindow {
    pub fn unbounded() -> Self {
        Self {
            skip: 0,
            limit: None,
        }
    }
}

// 自定义反序列化函数，支持字符串到i64的转换
fn deserialize_string_to_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{Error, Unexpected, Visitor};
    use std::fmt;

    struct I64Visitor;

    impl<'de> Visitor<'de> for I64Visitor {
        type Value = i64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or a string containing an integer")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            if value <= i64::MAX as u64 {
                Ok(value as i64)
            } else {
                Err(Error::invalid_value(Unexpected::Unsigned(value), &self))
            }
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: Error,
        {
            value
                .trim()
                .parse()
                .map_err(|_| Error::invalid_value(Unexpected::Str(value), &self))
        }
    }

    deserializer.deserialize_any(I64Visitor)
}

fn deserialize_optional_string_to_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    deserialize_string_to_i64(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::web::Query;

    #[test]
    fn test_defaults_when_absent() {
        let query = Query::<PaginationQuery>::from_query("").unwrap().into_inner();
        assert_eq!(query.skip, 0);
        assert_eq!(query.limit, None);
        assert_eq!(
            query.window(),
            PageWindow {
                skip: 0,
                limit: Some(DEFAULT_LIMIT)
            }
        );
    }

    #[test]
    fn test_parses_string_values() {
        let query = Query::<PaginationQuery>::from_query("skip=4&limit=2")
            .unwrap()
            .into_inner();
        assert_eq!(
            query.window(),
            PageWindow {
                skip: 4,
                limit: Some(2)
            }
        );
    }

    #[test]
    fn test_window_clamps_out_of_range_values() {
        let query = PaginationQuery {
            skip: -3,
            limit: Some(10_000),
        };
        assert_eq!(
            query.window(),
            PageWindow {
                skip: 0,
                limit: Some(MAX_LIMIT)
            }
        );

        let query = PaginationQuery {
            skip: 0,
            limit: Some(0),
        };
        assert_eq!(query.window().limit, Some(1));
    }

    #[test]
    fn test_rejects_non_numeric_values() {
        assert!(Query::<PaginationQuery>::from_query("skip=abc").is_err());
    }
}
