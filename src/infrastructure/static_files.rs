// Static client assets embedded at compile time
use std::collections::HashMap;
use std::sync::OnceLock;

pub const STATIC_ROUTE_PREFIX: &str = "/static";

static STATIC_FILES: OnceLock<HashMap<&'static str, &'static [u8]>> = OnceLock::new();

fn init_static_files() -> HashMap<&'static str, &'static [u8]> {
    let mut files: HashMap<&'static str, &'static [u8]> = HashMap::new();

    files.insert(
        "js/notes.js",
        include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/static/js/notes.js")),
    );

    files
}

/// An embedded file by its path below `/static/`
pub fn static_file(path: &str) -> Option<&'static [u8]> {
    STATIC_FILES
        .get_or_init(init_static_files)
        .get(path.trim_start_matches('/'))
        .copied()
}

pub fn content_type(path: &str) -> &'static str {
    match path.rsplit('.').next() {
        Some("js") => "text/javascript; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}
