//! 路径参数提取器
//!
//! 路径中的 ID 必须是正整数，否则直接返回 400，不进入处理函数。

use actix_web::{HttpRequest, HttpResponse, error::InternalError};

use crate::models::{ApiResponse, ErrorCode};

/// 从路径参数中解析正整数 ID
pub fn parse_positive_i64(req: &HttpRequest, param: &str) -> Result<i64, actix_web::Error> {
    let raw = req.match_info().get(param).unwrap_or_default();
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => {
            let message = format!("Invalid path parameter '{param}': '{raw}'");
            let response = HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BadRequest, &message));
            Err(InternalError::from_response(message, response).into())
        }
    }
}

/// 定义一个从指定路径参数解析正整数 ID 的提取器
#[macro_export]
macro_rules! define_safe_i64_extractor {
    ($name:ident, $param:literal) => {
        #[derive(Debug, Clone, Copy)]
        pub struct $name(pub i64);

        impl actix_web::FromRequest for $name {
            type Error = actix_web::Error;
            type Future = std::future::Ready<Result<Self, Self::Error>>;

            fn from_request(
                req: &actix_web::HttpRequest,
                _payload: &mut actix_web::dev::Payload,
            ) -> Self::Future {
                std::future::ready(
                    $crate::utils::extractor::parse_positive_i64(req, $param).map($name),
                )
            }
        }
    };
}

define_safe_i64_extractor!(SafeIDI64, "id");

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test, web};

    async fn echo(id: SafeIDI64) -> HttpResponse {
        HttpResponse::Ok().body(id.0.to_string())
    }

    #[actix_web::test]
    async fn test_valid_id_is_extracted() {
        let app = test::init_service(App::new().route("/items/{id}", web::get().to(echo))).await;
        let req = test::TestRequest::get().uri("/items/42").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        assert_eq!(body, "42");
    }

    #[actix_web::test]
    async fn test_invalid_ids_are_rejected() {
        let app = test::init_service(App::new().route("/items/{id}", web::get().to(echo))).await;
        for uri in ["/items/abc", "/items/0", "/items/-3"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
        }
    }
}
