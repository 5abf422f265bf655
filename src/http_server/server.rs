//! # HTTP Server
//!
//! Combines the endpoint routers behind one CORS layer.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;
use crate::dataset::SalesTable;
use crate::observability::{self, Event};

use super::dashboard_routes::{dashboard_routes, DashboardState};
use super::observability_routes::{health_routes, observability_routes};

pub struct HttpServer {
    addr: String,
    router: Router,
}

impl HttpServer {
    pub fn new(config: &Config, table: SalesTable) -> Self {
        let state = Arc::new(DashboardState::new(table, config.settings()));
        Self {
            addr: config.socket_addr(),
            router: Self::build_router(&config.cors_origins, state),
        }
    }

    fn build_router(cors_origins: &[String], state: Arc<DashboardState>) -> Router {
        let cors = if cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(health_routes())
            .nest("/api", dashboard_routes(state))
            .nest("/observability", observability_routes())
            .layer(cors)
    }

    pub fn socket_addr(&self) -> &str {
        &self.addr
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    pub async fn start(self) -> Result<(), io::Error> {
        let addr: SocketAddr = self.addr.parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid socket address '{}': {}", self.addr, e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        let bound = listener.local_addr()?.to_string();
        observability::log_event_with_fields(Event::ServerListening, &[("addr", bound.as_str())]);

        axum::serve(listener, self.router).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn server(config: &Config) -> HttpServer {
        HttpServer::new(config, SalesTable::empty())
    }

    #[test]
    fn test_socket_addr_from_config() {
        let config = Config {
            port: 9100,
            ..Default::default()
        };
        assert_eq!(server(&config).socket_addr(), "127.0.0.1:9100");
    }

    #[tokio::test]
    async fn test_routes_mounted() {
        for uri in ["/health", "/api/options", "/api/dashboard", "/observability/metrics"] {
            let router = server(&Config::default()).router();
            let response = router
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "route {}", uri);
        }
    }

    #[tokio::test]
    async fn test_unknown_route_404() {
        let router = server(&Config::default()).router();
        let response = router
            .oneshot(Request::builder().uri("/rest/v1/x").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_restricted_cors_builds() {
        let config = Config {
            cors_origins: vec!["http://localhost:5173".into(), "not a url".into()],
            ..Default::default()
        };
        let response = server(&config)
            .router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_invalid_host_fails_to_start() {
        let config = Config {
            host: "not a host".into(),
            ..Default::default()
        };
        let err = server(&config).start().await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
