//! HTTP surface: landing page, note route, and image route.
//!
//! Requests are stateless; handlers share only the immutable
//! [`ServerConfig`] behind an `Arc`, so independent server instances can
//! coexist in one process. File reads are synchronous blocking I/O per
//! request, which is fine for a local single-user tool.

use crate::sandbox;
use crate::{images, notes, render, templates};
use axum::{
    extract::{Path as UrlPath, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

#[cfg(test)]
#[path = "server_test.rs"]
mod server_test;

// ============================================================================
// Configuration
// ============================================================================

/// Immutable per-server configuration, fixed at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Absolute notes root; every note and image lookup resolves under it
    pub notes_dir: PathBuf,
    /// Note to open the browser at instead of the landing page
    pub start_note: Option<String>,
    /// Block the serving task until Enter is pressed (interactive use);
    /// embedded/test use leaves this false and drives the router directly
    pub block_for_stop: bool,
}

impl ServerConfig {
    /// Build a config rooted at `notes_dir`. The directory must exist; it
    /// is canonicalized here, once, so all later sandbox checks are purely
    /// lexical.
    pub fn new(notes_dir: impl AsRef<Path>) -> io::Result<Self> {
        let notes_dir = fs::canonicalize(notes_dir)?;
        Ok(Self {
            notes_dir,
            start_note: None,
            block_for_stop: false,
        })
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn build_router(config: Arc<ServerConfig>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/notes/{*reference}", get(view_note))
        .route("/images/{*path}", get(serve_image))
        .with_state(config)
}

// ============================================================================
// Handlers
// ============================================================================

async fn index(State(config): State<Arc<ServerConfig>>) -> Response {
    match notes::list_notes(&config.notes_dir) {
        Ok(references) => Html(templates::landing_page(&references)).into_response(),
        Err(err) => {
            tracing::error!("note index walk failed: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to list notes").into_response()
        }
    }
}

async fn view_note(
    UrlPath(reference): UrlPath<String>,
    State(config): State<Arc<ServerConfig>>,
) -> Response {
    let bytes = match notes::read_note(&config.notes_dir, &reference) {
        Ok(bytes) => bytes,
        Err(notes::NoteError::PathEscape(err)) => {
            // Escapes look identical to absence so directory structure
            // outside the root is never disclosed.
            tracing::warn!("rejected note path '{}': {}", reference, err);
            return (StatusCode::NOT_FOUND, "Note not found").into_response();
        }
        Err(notes::NoteError::NotFound(_)) => {
            return (StatusCode::NOT_FOUND, "Note not found").into_response();
        }
    };

    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            tracing::error!("note '{}' is not valid UTF-8: {}", reference, err);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render note").into_response();
        }
    };

    let rewritten = images::rewrite_image_refs(&text, &reference);
    Html(render::render_page(&rewritten)).into_response()
}

async fn serve_image(
    UrlPath(path): UrlPath<String>,
    State(config): State<Arc<ServerConfig>>,
) -> Response {
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return (StatusCode::NOT_FOUND, "Image not found").into_response();
    }

    // Client input carries only folder and filename; the reserved image
    // directory segment is inserted server-side.
    let (folder, file) = match path.rsplit_once('/') {
        Some((folder, file)) => (folder.trim_end_matches(['/', '\\']), file),
        None => ("", path),
    };
    if file.is_empty() {
        return (StatusCode::NOT_FOUND, "Image not found").into_response();
    }
    // "this directory" and "parent" carry no meaning as image folders.
    if folder == "." || folder == ".." {
        return (StatusCode::NOT_FOUND, "Image not found").into_response();
    }

    let relative = images::storage_path(folder, file);
    let physical = match sandbox::resolve_within(&config.notes_dir, &relative) {
        Ok(physical) => physical,
        Err(err) => {
            tracing::warn!("rejected image path '{}': {}", path, err);
            return (StatusCode::NOT_FOUND, "Image not found").into_response();
        }
    };

    match fs::read(&physical) {
        Ok(bytes) => ([(header::CONTENT_TYPE, content_type_for(file))], bytes).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "Image not found").into_response(),
    }
}

/// Content type from the filename extension; unknown extensions are served
/// as opaque bytes.
fn content_type_for(file: &str) -> &'static str {
    let extension = Path::new(file)
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

// ============================================================================
// Serving
// ============================================================================

/// Bind on 127.0.0.1 and run the server.
///
/// With `block_for_stop` set this opens the browser at the start note (or
/// the landing page) and holds the calling task until the user presses
/// Enter; otherwise the accept loop is spawned and the call returns
/// immediately.
pub async fn serve(config: ServerConfig, port: u16) -> io::Result<()> {
    let config = Arc::new(config);
    let app = build_router(config.clone());

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    let addr = listener.local_addr()?;
    tracing::info!("notes server listening on http://{}", addr);

    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, app).await {
            tracing::error!("server error: {}", err);
        }
    });

    if config.block_for_stop {
        let url = match &config.start_note {
            Some(reference) => format!("http://{}/notes/{}", addr, reference),
            None => format!("http://{}", addr),
        };
        if let Err(err) = open_browser(&url) {
            tracing::warn!("could not open browser at {}: {}", url, err);
        }
        println!("Press Enter to stop the server...");
        wait_for_enter().await?;
    }

    Ok(())
}

async fn wait_for_enter() -> io::Result<()> {
    tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        io::stdin().read_line(&mut line).map(|_| ())
    })
    .await
    .map_err(io::Error::other)?
}

/// Open `url` in the system default browser.
pub fn open_browser(url: &str) -> io::Result<()> {
    #[cfg(target_os = "windows")]
    let spawned = Command::new("cmd").args(["/C", "start", "", url]).spawn();
    #[cfg(target_os = "macos")]
    let spawned = Command::new("open").arg(url).spawn();
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    let spawned = Command::new("xdg-open").arg(url).spawn();

    spawned.map(|_| ())
}
