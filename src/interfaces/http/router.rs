//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    routing::{get, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{BookingService, CarService, UserService};
use crate::domain::RepositoryProvider;
use crate::interfaces::http::common::ApiResponse;

use super::modules::{bookings, cars, health, users};

/// Shared state for every route. Handlers extract their own slice via `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub booking_service: Arc<BookingService>,
    pub car_service: Arc<CarService>,
    pub user_service: Arc<UserService>,
    pub started_at: Arc<Instant>,
}

impl AppState {
    /// Build all services over one repository provider.
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self {
            booking_service: Arc::new(BookingService::new(repos.clone())),
            car_service: Arc::new(CarService::new(repos.clone())),
            user_service: Arc::new(UserService::new(repos.clone())),
            repos,
            started_at: Arc::new(Instant::now()),
        }
    }
}

// -- FromRef implementations so each handler keeps its own State<T> extractor --

impl FromRef<AppState> for bookings::BookingHandlerState {
    fn from_ref(s: &AppState) -> Self {
        bookings::BookingHandlerState {
            booking_service: Arc::clone(&s.booking_service),
        }
    }
}

impl FromRef<AppState> for cars::CarHandlerState {
    fn from_ref(s: &AppState) -> Self {
        cars::CarHandlerState {
            car_service: Arc::clone(&s.car_service),
        }
    }
}

impl FromRef<AppState> for users::UserHandlerState {
    fn from_ref(s: &AppState) -> Self {
        users::UserHandlerState {
            user_service: Arc::clone(&s.user_service),
        }
    }
}

impl FromRef<AppState> for health::HealthState {
    fn from_ref(s: &AppState) -> Self {
        health::HealthState {
            repos: Arc::clone(&s.repos),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Bookings
        bookings::list_bookings,
        bookings::list_active_bookings,
        bookings::list_user_bookings,
        bookings::get_booking,
        bookings::create_booking,
        bookings::update_booking,
        bookings::return_car,
        bookings::delete_booking,
        // Cars
        cars::list_cars,
        cars::get_car,
        cars::create_car,
        cars::update_car,
        cars::delete_car,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
    ),
    components(
        schemas(
            ApiResponse<String>,
            health::HealthResponse,
            health::ComponentHealth,
            bookings::BookingDto,
            bookings::CreateBookingRequest,
            bookings::UpdateBookingRequest,
            cars::CarDto,
            cars::CarRequest,
            users::UserDto,
            users::CreateUserRequest,
            users::UpdateUserRequest,
        )
    ),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Bookings", description = "Booking lifecycle: book, return, edit, delete"),
        (name = "Cars", description = "Car catalogue administration"),
        (name = "Users", description = "Customer and administrator accounts"),
    ),
    info(
        title = "Car Rental API",
        version = "1.0.0",
        description = "REST API for booking and returning rental cars",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(state: AppState) -> Router {
    let booking_routes = Router::new()
        .route(
            "/",
            get(bookings::list_bookings).post(bookings::create_booking),
        )
        .route("/active", get(bookings::list_active_bookings))
        .route("/user/{user_id}", get(bookings::list_user_bookings))
        .route("/return/{id}", put(bookings::return_car))
        .route(
            "/{id}",
            get(bookings::get_booking)
                .put(bookings::update_booking)
                .delete(bookings::delete_booking),
        );

    let car_routes = Router::new()
        .route("/", get(cars::list_cars).post(cars::create_car))
        .route(
            "/{id}",
            get(cars::get_car)
                .put(cars::update_car)
                .delete(cars::delete_car),
        );

    let user_routes = Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route(
            "/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        );

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes =
        SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .route("/health", get(health::health_check))
        .nest("/api/v1/bookings", booking_routes)
        .nest("/api/v1/cars", car_routes)
        .nest("/api/v1/users", user_routes)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ── Tests ──────────────────────────────────────────────────────
