//! 管理后台静态资源
//!
//! 编译时通过 rust-embed 嵌入 `admin/dist/` 下的 React-Admin 构建产物。
//! 未命中的前端路由回退到 `index.html`，`api/` 下未注册的路径返回 JSON 404。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header, web};
use rust_embed::Embed;
use std::path::Path;

use crate::models::{ApiResponse, ErrorCode};

#[derive(Embed)]
#[folder = "admin/dist/"]
struct AdminAssets;

const INDEX_HTML: &str = "index.html";

fn extension(path: &str) -> &str {
    Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
}

fn mime_type(path: &str) -> &'static str {
    match extension(path) {
        "html" => "text/html; charset=utf-8",
        "js" | "mjs" => "application/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" | "map" => "application/json",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "webp" => "image/webp",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "txt" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

/// Vite 输出的 assets/ 带内容哈希，可长期缓存
fn is_immutable(path: &str) -> bool {
    path.starts_with("assets/") && extension(path) != "html"
}

fn is_api_path(path: &str) -> bool {
    path == "api" || path.starts_with("api/")
}

pub async fn serve_admin(req: HttpRequest) -> ActixResult<HttpResponse> {
    let path = req.match_info().query("tail").trim_start_matches('/');

    if is_api_path(path) {
        return Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error_empty(
            ErrorCode::NotFound,
            format!("No API route for /{path}"),
        )));
    }

    let (file, file_path) = match AdminAssets::get(path).filter(|_| !path.is_empty()) {
        Some(file) => (Some(file), path),
        None => (AdminAssets::get(INDEX_HTML), INDEX_HTML),
    };

    let Some(file) = file else {
        return Ok(HttpResponse::NotFound()
            .content_type("text/plain; charset=utf-8")
            .body("Admin console has not been built"));
    };

    let cache_control = if is_immutable(file_path) {
        "public, max-age=31536000, immutable"
    } else {
        "no-cache"
    };
    Ok(HttpResponse::Ok()
        .content_type(mime_type(file_path))
        .insert_header((header::CACHE_CONTROL, cache_control))
        .body(file.data.into_owned()))
}

/// 须最后注册，兜底所有未匹配的 GET
pub fn configure_frontend_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{tail:.*}", web::get().to(serve_admin));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type() {
        assert_eq!(mime_type("index.html"), "text/html; charset=utf-8");
        assert_eq!(
            mime_type("assets/index-3f2a.js"),
            "application/javascript; charset=utf-8"
        );
        assert_eq!(mime_type("assets/app.css"), "text/css; charset=utf-8");
        assert_eq!(mime_type("favicon.ico"), "image/x-icon");
        assert_eq!(mime_type("LICENSE"), "application/octet-stream");
    }

    #[test]
    fn test_cache_and_api_paths() {
        assert!(is_immutable("assets/index-3f2a.js"));
        assert!(!is_immutable("index.html"));
        assert!(!is_immutable("manifest.json"));

        assert!(is_api_path("api/v1/unknown"));
        assert!(!is_api_path("apiary"));
        assert!(!is_api_path("students/12"));
    }
}
