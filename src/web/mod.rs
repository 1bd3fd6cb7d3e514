//! Web layer
//!
//! Thin handlers over the service layer, a standardized response
//! envelope, extractor-based authentication, and the router wiring it
//! all together. Reads on inventory data are public; mutations require a
//! bearer token, and buyer/user/media administration requires the ADMIN
//! role.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post, put},
};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::auth::JwtService;
use crate::config::Config;
use crate::database::Database;
use crate::services::{
    ApartmentService, AuthService, BuyerService, FloorService, MediaService, PictureService,
    UserService,
};
use crate::storage::ObjectStorage;

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod responses;
pub mod utils;

pub use extractors::{AdminUser, AuthUser};
pub use responses::{ApiResponse, handle_error, handle_result};

/// Shared application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub jwt: JwtService,
    pub floor_service: FloorService,
    pub apartment_service: ApartmentService,
    pub buyer_service: BuyerService,
    pub user_service: UserService,
    pub picture_service: PictureService,
    pub media_service: MediaService,
    pub auth_service: AuthService,
}

impl AppState {
    pub fn new(config: Config, database: Database, object_storage: Arc<dyn ObjectStorage>) -> Self {
        let media_service = MediaService::new(
            object_storage,
            Duration::from_secs(config.storage.signed_url_ttl_secs),
        );
        let jwt = JwtService::new(&config.auth);

        let user_service = UserService::new(database.users());
        let auth_service = AuthService::new(user_service.clone(), jwt.clone());

        Self {
            jwt,
            floor_service: FloorService::new(database.floors(), media_service.clone()),
            apartment_service: ApartmentService::new(database.apartments(), media_service.clone()),
            buyer_service: BuyerService::new(database.buyers()),
            picture_service: PictureService::new(database.pictures(), media_service.clone()),
            user_service,
            media_service,
            auth_service,
            config: Arc::new(config),
        }
    }
}

/// Build the application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let max_upload_bytes = state.config.web.max_upload_bytes;

    Router::new()
        // Health check (no auth)
        .route("/health", get(handlers::health::health_check))
        .nest("/api", api_routes())
        // Middleware (applied in reverse order)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(axum::middleware::from_fn(
            middleware::request_logging_middleware,
        ))
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        // Apartments
        .route(
            "/apartments",
            get(handlers::apartments::list_apartments)
                .post(handlers::apartments::create_apartment),
        )
        .route(
            "/apartments/simple",
            post(handlers::apartments::create_apartment_simple),
        )
        .route(
            "/apartments/price",
            get(handlers::apartments::get_apartments_by_price_range),
        )
        .route(
            "/apartments/status/{status}",
            get(handlers::apartments::get_apartments_by_status),
        )
        .route(
            "/apartments/floor/{floor_id}",
            get(handlers::apartments::get_apartments_by_floor),
        )
        .route(
            "/apartments/type/{unit_type}",
            get(handlers::apartments::get_apartments_by_type),
        )
        .route(
            "/apartments/{id}",
            get(handlers::apartments::get_apartment)
                .put(handlers::apartments::update_apartment)
                .delete(handlers::apartments::delete_apartment),
        )
        .route(
            "/apartments/{id}/simple",
            put(handlers::apartments::update_apartment_simple),
        )
        // Apartment pictures
        .route(
            "/apartments/{id}/pictures",
            get(handlers::pictures::list_apartment_pictures)
                .post(handlers::pictures::upload_apartment_pictures),
        )
        .route(
            "/apartments/{id}/pictures/reorder",
            put(handlers::pictures::reorder_apartment_pictures),
        )
        .route("/pictures/{id}", axum::routing::delete(handlers::pictures::delete_picture))
        // Floors
        .route(
            "/floors",
            get(handlers::floors::list_floors).post(handlers::floors::create_floor),
        )
        .route("/floors/simple", post(handlers::floors::create_floor_simple))
        .route(
            "/floors/{id}",
            get(handlers::floors::get_floor)
                .put(handlers::floors::update_floor)
                .delete(handlers::floors::delete_floor),
        )
        .route(
            "/floors/{id}/simple",
            put(handlers::floors::update_floor_simple),
        )
        .route(
            "/floors/{id}/hotspots",
            put(handlers::floors::update_floor_hotspots),
        )
        .route(
            "/floors/{id}/images",
            get(handlers::floors::list_floor_images)
                .post(handlers::floors::upload_floor_images),
        )
        .route(
            "/floors/{id}/images/details",
            get(handlers::floors::get_floor_image_details),
        )
        .route(
            "/floors/{id}/images/{file_name}",
            axum::routing::delete(handlers::floors::delete_floor_image),
        )
        .route(
            "/floors/{id}/images/{file_name}/rename",
            put(handlers::floors::rename_floor_image),
        )
        .route(
            "/floors/{id}/images/{file_name}/info",
            get(handlers::floors::get_floor_image_info),
        )
        // Buyers
        .route(
            "/buyers",
            get(handlers::buyers::list_buyers).post(handlers::buyers::create_buyer),
        )
        .route(
            "/buyers/date-range",
            get(handlers::buyers::get_buyers_by_date_range),
        )
        .route(
            "/buyers/status/{status}",
            get(handlers::buyers::get_buyers_by_status),
        )
        .route(
            "/buyers/apartment/{apartment_id}",
            get(handlers::buyers::get_buyers_by_apartment),
        )
        .route(
            "/buyers/{id}",
            get(handlers::buyers::get_buyer)
                .put(handlers::buyers::update_buyer)
                .delete(handlers::buyers::delete_buyer),
        )
        // Users (admin only)
        .route(
            "/users",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route(
            "/users/{id}",
            get(handlers::users::get_user)
                .put(handlers::users::update_user)
                .delete(handlers::users::delete_user),
        )
        // Auth
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/register", post(handlers::auth::register))
        // Media
        .route("/media/upload/{type}", post(handlers::media::upload_file))
        .route(
            "/media/url/{type}/{file_name}",
            get(handlers::media::get_file_url),
        )
        .route(
            "/media/exists/{type}/{file_name}",
            get(handlers::media::check_file_exists),
        )
        .route(
            "/media/{type}/{file_name}",
            axum::routing::delete(handlers::media::delete_file),
        )
}

/// Web server: binds the configured address and serves the router
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(state: AppState) -> Result<Self> {
        let addr: SocketAddr =
            format!("{}:{}", state.config.web.host, state.config.web.port).parse()?;
        Ok(Self {
            app: create_router(state),
            addr,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        info!("listening on {}", self.addr);
        axum::serve(listener, self.app).await?;
        Ok(())
    }
}
