//! Car catalogue API handlers
//!
//! Delegates to `CarService` from the application layer.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use super::dto::{CarDto, CarRequest};
use crate::application::CarService;
use crate::domain::{DomainError, EntityKind};
use crate::interfaces::http::common::{error_response, ApiError, ApiResponse, ValidatedJson};

#[derive(Clone)]
pub struct CarHandlerState {
    pub car_service: Arc<CarService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/cars",
    tag = "Cars",
    responses(
        (status = 200, description = "Car list", body = ApiResponse<Vec<CarDto>>)
    )
)]
pub async fn list_cars(
    State(state): State<CarHandlerState>,
) -> Result<Json<ApiResponse<Vec<CarDto>>>, ApiError> {
    let cars = state.car_service.list_cars().await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(
        cars.into_iter().map(CarDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/cars/{id}",
    tag = "Cars",
    params(("id" = i64, Path, description = "Car ID")),
    responses(
        (status = 200, description = "Car details", body = ApiResponse<CarDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_car(
    State(state): State<CarHandlerState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<CarDto>>, ApiError> {
    match state.car_service.get_car(id).await {
        Ok(Some(car)) => Ok(Json(ApiResponse::success(CarDto::from(car)))),
        Ok(None) => Err(error_response(DomainError::not_found(EntityKind::Car, id))),
        Err(e) => Err(error_response(e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/cars",
    tag = "Cars",
    request_body = CarRequest,
    responses(
        (status = 201, description = "Car created", body = ApiResponse<CarDto>),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_car(
    State(state): State<CarHandlerState>,
    ValidatedJson(request): ValidatedJson<CarRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CarDto>>), ApiError> {
    let car = state
        .car_service
        .add_car(request.into())
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(CarDto::from(car)))))
}

#[utoipa::path(
    put,
    path = "/api/v1/cars/{id}",
    tag = "Cars",
    params(("id" = i64, Path, description = "Car ID")),
    request_body = CarRequest,
    responses(
        (status = 200, description = "Car updated", body = ApiResponse<CarDto>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Car changed concurrently")
    )
)]
pub async fn update_car(
    State(state): State<CarHandlerState>,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<CarRequest>,
) -> Result<Json<ApiResponse<CarDto>>, ApiError> {
    let car = state
        .car_service
        .update_car(id, request.into())
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(CarDto::from(car))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/cars/{id}",
    tag = "Cars",
    params(("id" = i64, Path, description = "Car ID")),
    responses(
        (status = 204, description = "Car deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_car(
    State(state): State<CarHandlerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .car_service
        .delete_car(id)
        .await
        .map_err(error_response)?;
    Ok(StatusCode::NO_CONTENT)
}
