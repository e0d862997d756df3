//! Artifact preview server — serves a directory of generated plot artifacts
//! over localhost with live reload, so a scene can be inspected in a plain
//! browser while it is being regenerated.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Path as UrlPath, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use notify::{Event, RecursiveMode, Watcher};
use tower_livereload::LiveReloadLayer;

struct ServeState {
    dir: PathBuf,
}

/// Serve `dir` on `127.0.0.1:<port>`, reloading connected browsers whenever
/// anything in the directory changes.
pub async fn serve(dir: PathBuf, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(ServeState { dir: dir.clone() });

    let livereload = LiveReloadLayer::new();
    let reloader = livereload.reloader();

    // File watcher: any modification in the artifact directory triggers a reload.
    let mut watcher = notify::recommended_watcher(move |res: Result<Event, _>| {
        if let Ok(event) = res {
            if event.kind.is_modify() || event.kind.is_create() {
                reloader.reload();
            }
        }
    })?;
    watcher.watch(&dir, RecursiveMode::Recursive)?;

    let app = Router::new()
        .route("/", get(serve_index))
        .route("/{*path}", get(serve_file))
        .layer(livereload)
        .with_state(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    eprintln!("pyntcloud-plot preview server");
    eprintln!("  directory: {}", dir.display());
    eprintln!("  preview:   http://localhost:{port}/");
    eprintln!("  watching for changes...");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    // Keep watcher alive
    drop(watcher);
    Ok(())
}

/// Index: list every generated scene (one per `.config.json`) with a link
/// to its viewer page.
async fn serve_index(State(state): State<Arc<ServeState>>) -> Html<String> {
    let mut scenes = Vec::new();
    if let Ok(mut entries) = tokio::fs::read_dir(&state.dir).await {
        while let Ok(Some(entry)) = entries.next_entry().await {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if let Some(stem) = name.strip_suffix(".config.json") {
                scenes.push(stem.to_string());
            }
        }
    }
    scenes.sort();

    let items: String = scenes
        .iter()
        .map(|s| format!("<li><a href=\"/{s}.html\">{s}</a></li>\n", s = html_escape(s)))
        .collect();
    let body = if items.is_empty() {
        "<p>No scenes found. Run <code>pyntplot plot</code> first.</p>".to_string()
    } else {
        format!("<ul>\n{items}</ul>")
    };

    Html(format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\">\
         <title>pyntcloud-plot scenes</title></head>\n\
         <body><h1>Generated scenes</h1>\n{body}\n</body></html>"
    ))
}

async fn serve_file(
    State(state): State<Arc<ServeState>>,
    UrlPath(path): UrlPath<String>,
) -> Response {
    // Reject traversal out of the artifact directory.
    if path.split('/').any(|seg| seg == "..") {
        return (StatusCode::BAD_REQUEST, "bad path").into_response();
    }

    let full = state.dir.join(&path);
    match tokio::fs::read(&full).await {
        Ok(bytes) => (
            [(header::CONTENT_TYPE, content_type(&path))],
            bytes,
        )
            .into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "not found").into_response(),
    }
}

fn content_type(path: &str) -> &'static str {
    match path.rsplit('.').next() {
        Some("html") => "text/html; charset=utf-8",
        Some("json") => "application/json",
        Some("js") => "text/javascript",
        Some("css") => "text/css",
        Some("ply") => "text/plain",
        Some("png") => "image/png",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_types_by_extension() {
        assert_eq!(content_type("scene.html"), "text/html; charset=utf-8");
        assert_eq!(content_type("scene.config.json"), "application/json");
        assert_eq!(content_type("pyntcloud_plot_assets/viewer.js"), "text/javascript");
        assert_eq!(content_type("scene.ply"), "text/plain");
        assert_eq!(content_type("no_extension"), "application/octet-stream");
    }

    #[test]
    fn escape_strips_markup() {
        assert_eq!(html_escape("<a&b>"), "&lt;a&amp;b&gt;");
    }
}
