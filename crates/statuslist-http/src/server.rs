use crate::errors::StatusListHTTPError;
use crate::{config::HTTPConfig, handlers, state::AppState, verifier};
use axum::routing::{get, post, IntoMakeService};
use axum::Router;
use hyper::server::conn::AddrIncoming;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub struct StatusListRouter {
    router: Router,
}

impl From<Arc<AppState>> for StatusListRouter {
    fn from(app_state: Arc<AppState>) -> Self {
        Self {
            router: Self::generate_router(app_state),
        }
    }
}

impl StatusListRouter {
    /// Constructs a router given shared app state.
    fn generate_router(shared_state: Arc<AppState>) -> Router {
        Router::new()
            .route("/", get(handlers::index))
            .route("/status/:id", get(handlers::get_status_list))
            .route(
                "/credentials/verify",
                post(verifier::StatusListVerifierHTTPHandler::post_verify),
            )
            .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
            .with_state(shared_state)
    }

    /// Moves wrapped app router and consumes.
    pub fn router(self) -> Router {
        self.router
    }
}

/// General method to spawn a status list server given HTTPConfig.
pub fn server(
    config: HTTPConfig,
) -> Result<axum::Server<AddrIncoming, IntoMakeService<Router>>, StatusListHTTPError> {
    let addr = config.to_socket_address();
    let shared_state = Arc::new(AppState::new(config)?);
    let app = StatusListRouter::from(shared_state).router();
    Ok(axum::Server::bind(&addr).serve(app.into_make_service()))
}
