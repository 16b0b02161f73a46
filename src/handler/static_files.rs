//! Static file serving module
//!
//! Resolves request paths against the static root, loads file contents, and
//! builds responses with content-type and cache headers.

use std::path::{Path, PathBuf};

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use tokio::fs;

use crate::config::StaticConfig;
use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime};
use crate::logger;

/// Serve a file from the static root
pub async fn serve(ctx: &RequestContext<'_>, cfg: &StaticConfig) -> Response<Full<Bytes>> {
    match load_from_root(&cfg.root, ctx.path, &cfg.index_files).await {
        Some((content, content_type)) => {
            build_file_response(content, content_type, ctx.if_none_match.as_deref(), ctx.is_head)
        }
        None => http::build_404_response(),
    }
}

/// Load a file from the root directory with index file resolution
pub async fn load_from_root(
    root: &str,
    request_path: &str,
    index_files: &[String],
) -> Option<(Vec<u8>, &'static str)> {
    let relative = sanitize_request_path(request_path)?;

    let mut file_path = Path::new(root).join(&relative);

    // Directory requests resolve through the index file list, so "/" and
    // "/index.html" read the same file
    if relative.is_empty() || relative.ends_with('/') || file_path.is_dir() {
        file_path = resolve_index(&file_path, index_files)?;
    }

    let root_canonical = match Path::new(root).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!("Static root not accessible '{root}': {e}"));
            return None;
        }
    };

    // A canonicalize failure here is an ordinary 404
    let canonical = file_path.canonicalize().ok()?;
    if !canonical.starts_with(&root_canonical) {
        logger::log_warning(&format!("Path escapes static root: {request_path}"));
        return None;
    }

    let content = match fs::read(&canonical).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {}",
                canonical.display(),
                e
            ));
            return None;
        }
    };

    let content_type = mime::content_type_for(canonical.extension().and_then(|e| e.to_str()));

    Some((content, content_type))
}

/// Strip the leading slash and reject parent-directory segments
fn sanitize_request_path(path: &str) -> Option<String> {
    let relative = path.trim_start_matches('/');
    if relative.split('/').any(|segment| segment == "..") {
        logger::log_warning(&format!("Rejected traversal path: {path}"));
        return None;
    }
    Some(relative.to_string())
}

/// First index file that exists under the directory
fn resolve_index(dir: &Path, index_files: &[String]) -> Option<PathBuf> {
    index_files
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}

/// Build a static file response with `ETag` handling
fn build_file_response(
    content: Vec<u8>,
    content_type: &str,
    if_none_match: Option<&str>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let etag = cache::generate_etag(&content);

    if cache::check_etag_match(if_none_match, &etag) {
        return http::build_304_response(&etag);
    }

    http::response::build_cached_response(Bytes::from(content), content_type, &etag, is_head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_plain_paths() {
        assert_eq!(sanitize_request_path("/index.html").as_deref(), Some("index.html"));
        assert_eq!(sanitize_request_path("/css/site.css").as_deref(), Some("css/site.css"));
        assert_eq!(sanitize_request_path("/").as_deref(), Some(""));
    }

    #[test]
    fn test_sanitize_rejects_traversal() {
        assert!(sanitize_request_path("/../etc/passwd").is_none());
        assert!(sanitize_request_path("/a/../b").is_none());
        assert!(sanitize_request_path("/..").is_none());
    }

    #[test]
    fn test_sanitize_keeps_dotted_names() {
        // ".." must match a whole segment, not a substring
        assert_eq!(
            sanitize_request_path("/notes..txt").as_deref(),
            Some("notes..txt")
        );
    }

    #[test]
    fn test_etag_miss_keeps_body() {
        let resp = build_file_response(b"<html></html>".to_vec(), "text/html; charset=utf-8", None, false);
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers().get("Content-Length").unwrap(), "13");
    }

    #[test]
    fn test_etag_hit_returns_304() {
        let etag = cache::generate_etag(b"<html></html>");
        let resp = build_file_response(
            b"<html></html>".to_vec(),
            "text/html; charset=utf-8",
            Some(&etag),
            false,
        );
        assert_eq!(resp.status(), 304);
    }
}
