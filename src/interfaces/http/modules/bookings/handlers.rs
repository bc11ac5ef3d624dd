//! Booking HTTP handlers
//!
//! Thin wrappers over `BookingService`; the service owns the unit of work.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::application::BookingService;
use crate::domain::{Booking, DomainError, EntityKind};
use crate::interfaces::http::common::{error_response, ApiError, ApiResponse, ValidatedJson};

use super::dto::*;

/// Booking handler state
#[derive(Clone)]
pub struct BookingHandlerState {
    pub booking_service: Arc<BookingService>,
}

fn to_dtos(bookings: Vec<Booking>) -> Vec<BookingDto> {
    bookings.into_iter().map(BookingDto::from).collect()
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    tag = "Bookings",
    responses(
        (status = 200, description = "All bookings", body = ApiResponse<Vec<BookingDto>>)
    )
)]
pub async fn list_bookings(
    State(state): State<BookingHandlerState>,
) -> Result<Json<ApiResponse<Vec<BookingDto>>>, ApiError> {
    let bookings = state
        .booking_service
        .get_all_bookings()
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(to_dtos(bookings))))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/active",
    tag = "Bookings",
    responses(
        (status = 200, description = "Bookings whose car is still out", body = ApiResponse<Vec<BookingDto>>)
    )
)]
pub async fn list_active_bookings(
    State(state): State<BookingHandlerState>,
) -> Result<Json<ApiResponse<Vec<BookingDto>>>, ApiError> {
    let bookings = state
        .booking_service
        .get_active_bookings()
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(to_dtos(bookings))))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/user/{user_id}",
    tag = "Bookings",
    params(("user_id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "Bookings of the user, possibly empty", body = ApiResponse<Vec<BookingDto>>),
        (status = 404, description = "User not found")
    )
)]
pub async fn list_user_bookings(
    State(state): State<BookingHandlerState>,
    Path(user_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<BookingDto>>>, ApiError> {
    let bookings = state
        .booking_service
        .get_my_orders(user_id)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(to_dtos(bookings))))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/{id}",
    tag = "Bookings",
    params(("id" = i64, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking details", body = ApiResponse<BookingDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_booking(
    State(state): State<BookingHandlerState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<BookingDto>>, ApiError> {
    let booking = state
        .booking_service
        .get_booking_by_id(id)
        .await
        .map_err(error_response)?
        .ok_or_else(|| error_response(DomainError::not_found(EntityKind::Booking, id)))?;
    Ok(Json(ApiResponse::success(BookingDto::from(booking))))
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tag = "Bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Car booked", body = ApiResponse<BookingDto>),
        (status = 404, description = "User or car not found"),
        (status = 409, description = "Car changed concurrently"),
        (status = 422, description = "Invalid request")
    )
)]
pub async fn create_booking(
    State(state): State<BookingHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingDto>>), ApiError> {
    let booking = state
        .booking_service
        .create_booking(request.into())
        .await
        .map_err(error_response)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(BookingDto::from(booking))),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/bookings/{id}",
    tag = "Bookings",
    params(("id" = i64, Path, description = "Booking ID")),
    request_body = UpdateBookingRequest,
    responses(
        (status = 200, description = "Booking updated", body = ApiResponse<BookingDto>),
        (status = 400, description = "Resulting date range is reversed"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_booking(
    State(state): State<BookingHandlerState>,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<UpdateBookingRequest>,
) -> Result<Json<ApiResponse<BookingDto>>, ApiError> {
    let booking = state
        .booking_service
        .update_booking(id, request.into())
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(BookingDto::from(booking))))
}

#[utoipa::path(
    put,
    path = "/api/v1/bookings/return/{id}",
    tag = "Bookings",
    params(("id" = i64, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Car returned", body = ApiResponse<BookingDto>),
        (status = 404, description = "Booking or car not found")
    )
)]
pub async fn return_car(
    State(state): State<BookingHandlerState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<BookingDto>>, ApiError> {
    let booking = state
        .booking_service
        .return_car(id)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(BookingDto::from(booking))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/bookings/{id}",
    tag = "Bookings",
    params(("id" = i64, Path, description = "Booking ID")),
    responses(
        (status = 204, description = "Booking deleted, or it did not exist")
    )
)]
pub async fn delete_booking(
    State(state): State<BookingHandlerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .booking_service
        .delete_booking_by_id(id)
        .await
        .map_err(error_response)?;
    Ok(StatusCode::NO_CONTENT)
}
