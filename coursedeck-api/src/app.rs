/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use coursedeck_api::{app::{build_router, AppState}, config::Config};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::new(config);
/// let app = build_router(state);
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::{
    config::Config,
    middleware::security::{security_headers, SecurityHeaders},
};
use axum::{
    http::{header, HeaderValue, Method},
    middleware::map_response_with_state,
    routing::{get, post},
    Router,
};
use coursedeck_shared::{
    models::recommendation::{CatalogueRecommender, RecommendationSource},
    store::Store,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// All records, behind one lock; each request holds it for the whole
    /// mutation
    pub store: Arc<RwLock<Store>>,

    /// Application configuration
    pub config: Arc<Config>,

    /// Recommendation ranking
    pub recommender: Arc<dyn RecommendationSource>,
}

impl AppState {
    /// Creates state with an empty store and the catalogue recommender
    pub fn new(config: Config) -> Self {
        Self::with_store(Store::new(), config)
    }

    /// Creates state around an existing store
    pub fn with_store(store: Store, config: Config) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            config: Arc::new(config),
            recommender: Arc::new(CatalogueRecommender),
        }
    }

    /// Replaces the recommendation source
    pub fn with_recommender(mut self, recommender: Arc<dyn RecommendationSource>) -> Self {
        self.recommender = recommender;
        self
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET /health
/// └── /v1/
///     ├── /courses            GET, POST; /:id GET, PUT, DELETE; /:id/ratings POST
///     ├── /tags               GET, POST; /:id DELETE
///     ├── /categories         GET, POST; /:id DELETE
///     ├── /pomodoros          GET, POST; /:id GET, DELETE; /:id/advance, /:id/reset POST
///     ├── /todos              GET, POST; /board GET; /drop POST
///     │                       /:id PUT, DELETE; /:id/forward, /:id/backward POST
///     ├── /flashcards         GET, POST; /:id GET, DELETE; /:id/review POST
///     └── /recommendations    POST
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. Compression (gzip/brotli when the client accepts it)
/// 3. CORS (tower-http CorsLayer)
/// 4. Security headers
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let course_routes = Router::new()
        .route(
            "/",
            get(routes::courses::list_courses).post(routes::courses::create_course),
        )
        .route(
            "/:id",
            get(routes::courses::get_course)
                .put(routes::courses::update_course)
                .delete(routes::courses::delete_course),
        )
        .route("/:id/ratings", post(routes::courses::rate_course));

    let tag_routes = Router::new()
        .route("/", get(routes::tags::list_tags).post(routes::tags::create_tag))
        .route("/:id", axum::routing::delete(routes::tags::delete_tag));

    let category_routes = Router::new()
        .route(
            "/",
            get(routes::categories::list_categories).post(routes::categories::create_category),
        )
        .route("/:id", axum::routing::delete(routes::categories::delete_category));

    let pomodoro_routes = Router::new()
        .route(
            "/",
            get(routes::pomodoros::list_pomodoros).post(routes::pomodoros::create_pomodoro),
        )
        .route(
            "/:id",
            get(routes::pomodoros::get_pomodoro).delete(routes::pomodoros::delete_pomodoro),
        )
        .route("/:id/advance", post(routes::pomodoros::advance_pomodoro))
        .route("/:id/reset", post(routes::pomodoros::reset_pomodoro));

    let todo_routes = Router::new()
        .route("/", get(routes::todos::list_todos).post(routes::todos::create_todo))
        .route("/board", get(routes::todos::get_board))
        .route("/drop", post(routes::todos::drop_todo))
        .route(
            "/:id",
            axum::routing::put(routes::todos::update_todo).delete(routes::todos::delete_todo),
        )
        .route("/:id/forward", post(routes::todos::move_forward))
        .route("/:id/backward", post(routes::todos::move_backward));

    let flashcard_routes = Router::new()
        .route(
            "/",
            get(routes::flashcards::list_flashcards).post(routes::flashcards::create_flashcard),
        )
        .route(
            "/:id",
            get(routes::flashcards::get_flashcard).delete(routes::flashcards::delete_flashcard),
        )
        .route("/:id/review", post(routes::flashcards::review_flashcard));

    let v1_routes = Router::new()
        .nest("/courses", course_routes)
        .nest("/tags", tag_routes)
        .nest("/categories", category_routes)
        .nest("/pomodoros", pomodoro_routes)
        .nest("/todos", todo_routes)
        .nest("/flashcards", flashcard_routes)
        .route("/recommendations", post(routes::recommendations::recommend));

    // Configure CORS based on environment
    let cors = if state.config.cors_is_permissive() {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE])
            .max_age(std::time::Duration::from_secs(3600))
    };

    let security = SecurityHeaders::new(state.config.api.production);

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(map_response_with_state(security, security_headers))
        .with_state(state)
}
