//! 请求参数错误处理
//!
//! JSON 请求体与查询参数解析失败时统一返回 400 及标准响应结构。

use actix_web::{
    HttpRequest, HttpResponse,
    error::{InternalError, JsonPayloadError, QueryPayloadError},
};
use tracing::debug;

use crate::models::{ApiResponse, ErrorCode};

pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("Invalid JSON payload for {}: {}", req.path(), err);
    let response = match &err {
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            HttpResponse::PayloadTooLarge().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "Request body is too large",
            ))
        }
        JsonPayloadError::ContentType => HttpResponse::UnsupportedMediaType().json(
            ApiResponse::error_empty(ErrorCode::BadRequest, "Content-Type must be application/json"),
        ),
        _ => HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            format!("Invalid request body: {err}"),
        )),
    };
    InternalError::from_response(err, response).into()
}

pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("Invalid query string for {}: {}", req.path(), err);
    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::ValidationFailed,
        format!("Invalid query parameters: {err}"),
    ));
    InternalError::from_response(err, response).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test, web};
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Body {
        #[allow(dead_code)]
        name: String,
    }

    #[derive(Deserialize)]
    struct Params {
        #[allow(dead_code)]
        page: u32,
    }

    async fn accept_body(_body: web::Json<Body>) -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    async fn accept_query(_query: web::Query<Params>) -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[actix_web::test]
    async fn test_malformed_json_is_bad_request() {
        let app = test::init_service(
            App::new()
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .route("/", web::post().to(accept_body)),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/")
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{\"name\": ")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_malformed_query_is_bad_request() {
        let app = test::init_service(
            App::new()
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .route("/", web::get().to(accept_query)),
        )
        .await;
        let req = test::TestRequest::get().uri("/?page=abc").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
