//! Car administration service

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    Car, CarDetails, DomainError, DomainResult, EntityKind, RepositoryProvider, UnitOfWork,
};

use super::unit_of_work::{finish, finish_read};

/// Service for the car catalogue
pub struct CarService {
    repos: Arc<dyn RepositoryProvider>,
}

impl CarService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list_cars(&self) -> DomainResult<Vec<Car>> {
        let uow = self.repos.begin().await?;
        let result = uow.cars().find_all().await;
        finish_read(uow, result).await
    }

    pub async fn get_car(&self, id: i64) -> DomainResult<Option<Car>> {
        let uow = self.repos.begin().await?;
        let result = uow.cars().find_by_id(id).await;
        finish_read(uow, result).await
    }

    /// Add a car to the catalogue. New cars are never booked.
    pub async fn add_car(&self, mut details: CarDetails) -> DomainResult<Car> {
        details.booked = false;

        let uow = self.repos.begin().await?;
        let result = uow.cars().insert(details).await;
        let car = finish(uow, result).await?;

        info!(car_id = car.id, name = %car.name, model = %car.model, "Car added");
        Ok(car)
    }

    /// Overwrite a car's details, including its `booked` flag.
    pub async fn update_car(&self, id: i64, details: CarDetails) -> DomainResult<Car> {
        let uow = self.repos.begin().await?;
        let result = Self::update_in(uow.as_ref(), id, details).await;
        let car = finish(uow, result).await?;

        info!(car_id = car.id, version = car.version, "Car updated");
        Ok(car)
    }

    async fn update_in(uow: &dyn UnitOfWork, id: i64, details: CarDetails) -> DomainResult<Car> {
        let Some(mut car) = uow.cars().find_by_id(id).await? else {
            return Err(DomainError::not_found(EntityKind::Car, id));
        };
        car.apply_details(details);
        uow.cars().update(car).await
    }

    pub async fn delete_car(&self, id: i64) -> DomainResult<()> {
        let uow = self.repos.begin().await?;
        let result = Self::delete_in(uow.as_ref(), id).await;
        finish(uow, result).await?;

        info!(car_id = id, "Car deleted");
        Ok(())
    }

    async fn delete_in(uow: &dyn UnitOfWork, id: i64) -> DomainResult<()> {
        if !uow.cars().exists_by_id(id).await? {
            return Err(DomainError::not_found(EntityKind::Car, id));
        }
        uow.cars().delete_by_id(id).await
    }
}
