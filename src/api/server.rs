//! Static file server for the orrery front-end.
//!
//! Serves one fixed directory (the generated `celestial_bodies.json` plus
//! the rest of the static site) on all interfaces, with permissive CORS
//! so ES-module pages loaded from other origins can fetch the data, and
//! `Cache-Control` headers that keep browsers from caching a stale atlas.
//!
//! No authentication, no routing beyond static path resolution.

use axum::http::header::{self, HeaderValue};
use axum::http::Method;
use axum::Router;
use std::net::SocketAddr;
use std::path::Path;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::error::{ServerError, ServerResult};

/// Build the service: a `ServeDir` fallback wrapped in the CORS and
/// cache-control layers.
pub fn app(dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .fallback_service(ServeDir::new(dir))
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache, no-store, must-revalidate"),
        ))
}

/// Start the server and block until Ctrl-C.
///
/// Binding failure (port already in use) is reported as
/// [`ServerError::Bind`]; the caller exits non-zero.
pub async fn start_server(port: u16, dir: &Path) -> ServerResult<()> {
    if !dir.is_dir() {
        return Err(ServerError::MissingDirectory(dir.display().to_string()));
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { port, source })?;

    println!("🌌 Orrery static server");
    println!("🚀 Listening on http://localhost:{port}");
    println!("📁 Serving directory: {}", dir.display());
    println!();
    println!("✨ Open http://localhost:{port} in a browser");
    println!("❌ Press Ctrl+C to stop the server");

    axum::serve(listener, app(dir))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    println!("\n🛑 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    // If the handler cannot be installed the server runs until killed.
    let _ = tokio::signal::ctrl_c().await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_directory_is_reported() {
        let result = start_server(0, Path::new("/no/such/dir")).await;
        assert!(matches!(result, Err(ServerError::MissingDirectory(_))));
    }
}
