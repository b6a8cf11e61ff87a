use axum::{
    extract::State,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use std::path::PathBuf;
use tracing::error;

use crate::router::GatewayState;

const INDEX_FILE: &str = "index.html";

/// Prebuilt SPA bundle directory. Lookup is an explicit two-step: sanitize
/// and check the requested path on disk, else fall back to the entry file so
/// client-side routes resolve.
#[derive(Debug, Clone)]
pub struct AssetDir {
    root: PathBuf,
}

impl AssetDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn resolve(&self, path: &str) -> PathBuf {
        match self.lookup(path) {
            Some(file) => file,
            None => self.root.join(INDEX_FILE),
        }
    }

    fn lookup(&self, path: &str) -> Option<PathBuf> {
        let rel = path.trim_start_matches('/');
        if rel.is_empty() {
            return None;
        }
        let candidate = self.root.join(sanitize(rel)?);
        candidate.is_file().then_some(candidate)
    }
}

/// Rebuild the relative path segment by segment, refusing anything that
/// could escape the asset root.
fn sanitize(rel: &str) -> Option<PathBuf> {
    let mut clean = PathBuf::new();
    for seg in rel.split('/') {
        match seg {
            "" | "." => continue,
            ".." => return None,
            seg if seg.contains('\\') || seg.contains(':') => return None,
            seg => clean.push(seg),
        }
    }
    Some(clean)
}

/// Fallback handler for everything outside /api: static file bytes, or the
/// entry file for unknown paths.
pub async fn serve_asset(State(state): State<GatewayState>, uri: Uri) -> Response {
    let file = state.assets.resolve(uri.path());
    match tokio::fs::read(&file).await {
        Ok(bytes) => {
            let mime = mime_guess::from_path(&file).first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime.as_ref())], bytes).into_response()
        }
        Err(e) => {
            error!(path = %file.display(), error = %e, "asset bundle unreadable");
            (StatusCode::NOT_FOUND, "asset bundle not found").into_response()
        }
    }
}
