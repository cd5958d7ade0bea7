//! Route path normalization
//!
//! Derives the URL path of an app-router style route file from its location:
//!
//! ```text
//! src/app/api/users/[id]/posts/[postId]/route.ts  ->  /users/:id/posts/:postId
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::extract::HttpMethod;

/// File names that mark a directory as a route
const ROUTE_FILE_SUFFIXES: &[&str] = &["route.ts", "route.tsx", "route.js", "route.jsx", "route.mjs"];

static OPTIONAL_CATCH_ALL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[\[\.\.\.(\w+)\]\]$").expect("valid regex"));
static CATCH_ALL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[\.\.\.(\w+)\]$").expect("valid regex"));
static DYNAMIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(\w+)\]").expect("valid regex"));
static ROUTE_GROUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\([^/()]+\)$").expect("valid regex"));

/// A documented API route
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteRecord {
    pub url_path: String,
    pub methods: Vec<HttpMethod>,
    pub source_path: String,
}

/// Turn a route file path into its canonical URL path.
///
/// `file_path` and `api_root` may use either separator. A path that does not
/// live under `api_root` is returned unchanged.
pub fn normalize_route_path(file_path: &str, api_root: &str) -> String {
    let path = file_path.replace('\\', "/");
    let root = api_root.replace('\\', "/");
    let root = root.trim_end_matches('/');

    let Some(rest) = path.strip_prefix(root) else {
        debug!("Route file {} is outside {}", file_path, api_root);
        return file_path.to_string();
    };
    if !root.is_empty() && !rest.is_empty() && !rest.starts_with('/') {
        debug!("Route file {} is outside {}", file_path, api_root);
        return file_path.to_string();
    }

    let rest = strip_route_file(rest);

    let segments: Vec<String> = rest
        .split('/')
        .filter(|segment| !segment.is_empty())
        .filter(|segment| !ROUTE_GROUP.is_match(segment))
        .map(rewrite_segment)
        .collect();

    format!("/{}", segments.join("/"))
}

fn strip_route_file(rest: &str) -> &str {
    for suffix in ROUTE_FILE_SUFFIXES {
        if rest == *suffix {
            return "";
        }
        if let Some(dir) = rest.strip_suffix(suffix) {
            if dir.ends_with('/') {
                return dir;
            }
        }
    }
    rest
}

fn rewrite_segment(segment: &str) -> String {
    if let Some(caps) = OPTIONAL_CATCH_ALL.captures(segment) {
        return format!(":{}*?", &caps[1]);
    }
    if let Some(caps) = CATCH_ALL.captures(segment) {
        return format!(":{}*", &caps[1]);
    }
    DYNAMIC.replace_all(segment, ":$1").into_owned()
}
