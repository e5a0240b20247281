use crate::core::resolver;
use crate::domain::model::{ErrorResponse, GameClearRequest, GameClearResponse};
use crate::utils::error::FortuneError;
use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use tiny_http::Method;

const EMBEDDED_INDEX: &str = include_str!("../../static/index.html");
const STATIC_PREFIX: &str = "/static/";

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_HTML: &str = "text/html; charset=utf-8";

/// Shared, immutable per-process state handed to every request.
#[derive(Debug, Clone)]
pub struct AppState {
    static_dir: PathBuf,
    index_html: String,
}

impl AppState {
    /// Uses `<static_dir>/index.html` as the landing page when it exists,
    /// otherwise the page compiled into the binary.
    pub fn new(static_dir: impl Into<PathBuf>) -> Self {
        let static_dir = static_dir.into();
        let index_path = static_dir.join("index.html");

        let index_html = match std::fs::read_to_string(&index_path) {
            Ok(html) => {
                tracing::info!("Landing page loaded from {}", index_path.display());
                html
            }
            Err(e) => {
                tracing::info!(
                    "No landing page at {} ({}), using embedded page",
                    index_path.display(),
                    e
                );
                EMBEDDED_INDEX.to_string()
            }
        };

        Self {
            static_dir,
            index_html,
        }
    }

    pub fn static_dir(&self) -> &Path {
        &self.static_dir
    }

    pub fn index_html(&self) -> &str {
        &self.index_html
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn json<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => Self {
                status,
                content_type: CONTENT_TYPE_JSON,
                body,
            },
            Err(e) => {
                tracing::error!("Failed to serialize response: {}", e);
                Self {
                    status: 500,
                    content_type: "text/plain; charset=utf-8",
                    body: b"internal server error".to_vec(),
                }
            }
        }
    }

    pub fn html(body: &str) -> Self {
        Self {
            status: 200,
            content_type: CONTENT_TYPE_HTML,
            body: body.as_bytes().to_vec(),
        }
    }

    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Self::json(
            status,
            &ErrorResponse {
                error: message.into(),
            },
        )
    }
}

/// Dispatches one request. Pure apart from reading static files.
pub fn route(state: &AppState, method: &Method, url: &str, body: &[u8]) -> HttpResponse {
    let path = url.split('?').next().unwrap_or(url);

    match (method, path) {
        (Method::Get, "/") => HttpResponse::html(state.index_html()),
        (Method::Post, "/game_clear") => game_clear(body),
        (_, "/") | (_, "/game_clear") => HttpResponse::error(405, "method not allowed"),
        (Method::Get, p) if p.starts_with(STATIC_PREFIX) => {
            static_file(state.static_dir(), &p[STATIC_PREFIX.len()..])
        }
        _ => HttpResponse::error(404, "not found"),
    }
}

fn game_clear(body: &[u8]) -> HttpResponse {
    let request = match GameClearRequest::from_json(body).map_err(FortuneError::from) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!("Rejected game_clear body: {}", e);
            return HttpResponse::error(400, e.user_friendly_message());
        }
    };

    let message = resolver::resolve(&request.colors);
    HttpResponse::json(
        200,
        &GameClearResponse {
            message: message.to_string(),
        },
    )
}

fn static_file(static_dir: &Path, relative: &str) -> HttpResponse {
    let relative = Path::new(relative);
    let is_safe = !relative.as_os_str().is_empty()
        && relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
    if !is_safe {
        return HttpResponse::error(404, "not found");
    }

    let full_path = static_dir.join(relative);
    match std::fs::read(&full_path) {
        Ok(body) => HttpResponse {
            status: 200,
            content_type: content_type_for(&full_path),
            body,
        },
        Err(e) => {
            tracing::debug!("Static file {} unavailable: {}", full_path.display(), e);
            HttpResponse::error(404, "not found")
        }
    }
}

fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html") => CONTENT_TYPE_HTML,
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "application/javascript; charset=utf-8",
        Some("json") => CONTENT_TYPE_JSON,
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}
