use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::config::AppConfig;

// 通用列表查询参数
//
// 兼容 React-Admin 数据提供器的多种写法：
// - 分页：`page` + `perPage` / `pageSize` / `size`
// - 排序：`sort` + `order`（ASC / DESC）
// - 全文搜索：`q`
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/pagination.ts")]
pub struct ListQuery {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub size: Option<i64>,
    #[serde(default, rename = "perPage", deserialize_with = "deserialize_optional_i64")]
    pub per_page: Option<i64>,
    #[serde(
        default,
        rename = "pageSize",
        deserialize_with = "deserialize_optional_i64"
    )]
    pub page_size: Option<i64>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub order: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
}

impl ListQuery {
    /// 当前页（从 1 开始）
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1) as u64
    }

    /// 给定每页条数时可用的页码，保证偏移量 `(page - 1) * page_size` 不溢出
    pub fn page_for(&self, page_size: u64) -> u64 {
        let last_page = i64::MAX as u64 / page_size.max(1);
        self.page().min(last_page)
    }

    /// 每页条数，使用全局分页配置限制范围
    pub fn page_size(&self) -> u64 {
        let config = &AppConfig::get().pagination;
        self.page_size_within(config.default_page_size, config.max_page_size)
    }

    pub fn page_size_within(&self, default_size: i64, max_size: i64) -> u64 {
        self.page_size
            .or(self.per_page)
            .or(self.size)
            .unwrap_or(default_size)
            .clamp(1, max_size.max(1)) as u64
    }

    /// 排序方向，缺省为降序
    pub fn is_ascending(&self) -> bool {
        self.order
            .as_deref()
            .is_some_and(|o| o.eq_ignore_ascii_case("asc"))
    }

    /// 排序字段（去除空白，空字符串视为未指定）
    pub fn sort_field(&self) -> Option<&str> {
        self.sort.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// 搜索关键字（去除空白，空字符串视为未指定）
    pub fn search(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

// 分页响应信息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/pagination.ts")]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl PaginationInfo {
    pub fn new(page: u64, page_size: u64, total: u64) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total.div_ceil(page_size)
        };
        Self {
            page: page as i64,
            page_size: page_size as i64,
            total: total as i64,
            total_pages: total_pages as i64,
        }
    }
}

// 分页列表响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../admin/src/types/generated/pagination.ts")]
pub struct PaginatedResponse<T: TS> {
    pub items: Vec<T>,
    pub pagination: PaginationInfo,
}

impl<T: TS> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, page: u64, page_size: u64, total: u64) -> Self {
        Self {
            items,
            pagination: PaginationInfo::new(page, page_size, total),
        }
    }
}

// 自定义反序列化函数，支持字符串到i64的转换
//
// 查询字符串经过 `#[serde(flatten)]` 后数字以字符串形式到达，这里统一处理。
pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{Error, Unexpected, Visitor};
    use std::fmt;

    struct OptionalI64Visitor;

    impl<'de> Visitor<'de> for OptionalI64Visitor {
        type Value = Option<i64>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or a string containing an integer")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(Some(value))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            if value <= i64::MAX as u64 {
                Ok(Some(value as i64))
            } else {
                Err(Error::invalid_value(Unexpected::Unsigned(value), &self))
            }
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: Error,
        {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse()
                .map(Some)
                .map_err(|_| Error::invalid_value(Unexpected::Str(value), &self))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            deserializer.deserialize_any(self)
        }
    }

    deserializer.deserialize_any(OptionalI64Visitor)
}

// 查询字符串中的布尔值（true/false/1/0）
pub fn deserialize_optional_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{Error, Unexpected, Visitor};
    use std::fmt;

    struct OptionalBoolVisitor;

    impl<'de> Visitor<'de> for OptionalBoolVisitor {
        type Value = Option<bool>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a boolean or one of \"true\", \"false\", \"1\", \"0\"")
        }

        fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(Some(value))
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: Error,
        {
            match value.trim().to_ascii_lowercase().as_str() {
                "" => Ok(None),
                "true" | "1" => Ok(Some(true)),
                "false" | "0" => Ok(Some(false)),
                _ => Err(Error::invalid_value(Unexpected::Str(value), &self)),
            }
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            deserializer.deserialize_any(self)
        }
    }

    deserializer.deserialize_any(OptionalBoolVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::web::Query;

    #[derive(Debug, Deserialize)]
    struct StudentFilter {
        #[serde(flatten)]
        list: ListQuery,
        status: Option<String>,
    }

    #[test]
    fn test_query_string_numbers_are_parsed() {
        let query =
            Query::<ListQuery>::from_query("page=3&perPage=25&sort=last_name&order=ASC")
                .unwrap()
                .into_inner();
        assert_eq!(query.page(), 3);
        assert_eq!(query.page_size_within(10, 100), 25);
        assert!(query.is_ascending());
        assert_eq!(query.sort_field(), Some("last_name"));
    }

    #[test]
    fn test_flattened_list_query() {
        let filter = Query::<StudentFilter>::from_query("pageSize=5&q=%20ana%20&status=active")
            .unwrap()
            .into_inner();
        assert_eq!(filter.list.page(), 1);
        assert_eq!(filter.list.page_size_within(10, 100), 5);
        assert_eq!(filter.list.search(), Some("ana"));
        assert_eq!(filter.status.as_deref(), Some("active"));
    }

    #[test]
    fn test_page_size_is_clamped() {
        let query = ListQuery {
            size: Some(1000),
            ..Default::default()
        };
        assert_eq!(query.page_size_within(10, 100), 100);

        let query = ListQuery {
            per_page: Some(0),
            ..Default::default()
        };
        assert_eq!(query.page_size_within(10, 100), 1);

        let query = ListQuery::default();
        assert_eq!(query.page_size_within(10, 100), 10);
    }

    #[test]
    fn test_page_defaults_to_first() {
        let query = ListQuery {
            page: Some(-4),
            ..Default::default()
        };
        assert_eq!(query.page(), 1);
        assert!(!query.is_ascending());
    }

    #[test]
    fn test_huge_page_is_capped() {
        let query = Query::<ListQuery>::from_query("page=9223372036854775807&pageSize=20")
            .unwrap()
            .into_inner();
        let size = query.page_size_within(10, 100);
        let page = query.page_for(size);
        assert_eq!(page, i64::MAX as u64 / 20);
        assert!((page - 1).checked_mul(size).is_some_and(|offset| offset <= i64::MAX as u64));
        assert!(page.checked_mul(size).is_some());

        let query = ListQuery {
            page: Some(3),
            ..Default::default()
        };
        assert_eq!(query.page_for(25), 3);
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let result = Query::<ListQuery>::from_query("page=abc");
        assert!(result.is_err());
    }

    #[derive(Debug, Deserialize)]
    struct InvoiceFilter {
        #[serde(flatten)]
        list: ListQuery,
        #[serde(default, deserialize_with = "deserialize_optional_bool")]
        overdue: Option<bool>,
    }

    #[test]
    fn test_flattened_bool_filter() {
        let filter = Query::<InvoiceFilter>::from_query("overdue=true&page=2")
            .unwrap()
            .into_inner();
        assert_eq!(filter.overdue, Some(true));
        assert_eq!(filter.list.page(), 2);

        let filter = Query::<InvoiceFilter>::from_query("overdue=0").unwrap().into_inner();
        assert_eq!(filter.overdue, Some(false));

        assert!(Query::<InvoiceFilter>::from_query("overdue=maybe").is_err());
    }

    #[test]
    fn test_pagination_info_total_pages() {
        let info = PaginationInfo::new(1, 10, 21);
        assert_eq!(info.total_pages, 3);
        let empty = PaginationInfo::new(1, 10, 0);
        assert_eq!(empty.total_pages, 0);
    }
}
