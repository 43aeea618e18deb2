//! HTML for the viewer, preview and about pages, served over `pv://`.

use std::borrow::Cow;

use wry::http::{header::CONTENT_TYPE, Request, Response};

use crate::display::SurfaceMode;

pub const PROTOCOL: &str = "pv";

const VIEWER_HTML: &str = include_str!("../../resources/ui/viewer.html");
const VIEWER_CSS: &str = include_str!("../../resources/ui/viewer.css");
const VIEWER_JS: &str = include_str!("../../resources/ui/viewer.js");
const ABOUT_HTML: &str = include_str!("../../resources/ui/about.html");

// WebView2 only routes custom schemes through `http://<scheme>.localhost`.
#[cfg(target_os = "windows")]
fn origin() -> String {
    format!("http://{}.localhost", PROTOCOL)
}

#[cfg(not(target_os = "windows"))]
fn origin() -> String {
    format!("{}://localhost", PROTOCOL)
}

/// URL a surface of the given mode loads. The mode travels as a query flag.
pub fn surface_url(mode: SurfaceMode) -> String {
    format!("{}/index.html?{}", origin(), mode.as_query())
}

pub fn about_url() -> String {
    format!("{}/about.html", origin())
}

fn viewer_html(mode: SurfaceMode) -> String {
    let mode = match mode {
        SurfaceMode::Main => "main",
        SurfaceMode::Preview => "preview",
    };
    VIEWER_HTML
        .replace("{{MODE}}", mode)
        .replace("{{STYLE}}", VIEWER_CSS)
        .replace("{{SCRIPT}}", VIEWER_JS)
}

fn about_html() -> String {
    ABOUT_HTML
        .replace("{{NAME}}", "Photo Viewer")
        .replace("{{VERSION}}", env!("CARGO_PKG_VERSION"))
}

/// Custom-protocol handler shared by every webview.
pub fn respond(request: &Request<Vec<u8>>) -> Response<Cow<'static, [u8]>> {
    let uri = request.uri();
    let html = match uri.path() {
        "/about.html" => about_html(),
        _ => viewer_html(SurfaceMode::from_query(uri.query())),
    };
    Response::builder()
        .header(CONTENT_TYPE, "text/html; charset=utf-8")
        .body(Cow::Owned(html.into_bytes()))
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "failed to build page response");
            Response::new(Cow::Borrowed(&[][..]))
        })
}
