//! Bootcamp listing, radius search and owner-checked writes.

use serde_json::Value;
use std::sync::Arc;

use super::advanced_results::AdvancedResults;
use crate::domain::entities::{Bootcamp, NewBootcamp, UpdateBootcamp};
use crate::domain::identity::Identity;
use crate::domain::pagination::Page;
use crate::domain::query::QueryDescriptor;
use crate::domain::repositories::BootcampRepository;
use crate::error::AppError;

/// Largest accepted search radius in miles (half the earth's circumference).
const MAX_RADIUS_MILES: f64 = 12_451.0;

pub struct BootcampService {
    repository: Arc<dyn BootcampRepository>,
    results: Arc<AdvancedResults>,
}

impl BootcampService {
    pub fn new(repository: Arc<dyn BootcampRepository>, results: Arc<AdvancedResults>) -> Self {
        Self {
            repository,
            results,
        }
    }

    /// Runs a translated list query.
    pub async fn list(&self, query: &QueryDescriptor<Bootcamp>) -> Result<Page<Value>, AppError> {
        self.results
            .collect(
                query,
                self.repository.find(query),
                self.repository.count(&query.filter),
            )
            .await
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no bootcamp has this id.
    pub async fn get(&self, id: i64) -> Result<Bootcamp, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Bootcamps within `distance` miles of the given point.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ValidationFailed`] for coordinates outside their
    /// ranges or a negative or non-finite distance.
    pub async fn within_radius(
        &self,
        latitude: f64,
        longitude: f64,
        distance: f64,
    ) -> Result<Vec<Bootcamp>, AppError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(AppError::validation("Latitude must be between -90 and 90"));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(AppError::validation("Longitude must be between -180 and 180"));
        }
        if !distance.is_finite() || distance < 0.0 {
            return Err(AppError::validation("Distance must be a non-negative number"));
        }

        self.repository
            .find_within_radius(latitude, longitude, distance.min(MAX_RADIUS_MILES))
            .await
    }

    /// Publishes a bootcamp owned by the caller.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ValidationFailed`] if a non-admin caller already
    /// published one.
    pub async fn create(&self, caller: &Identity, mut input: NewBootcamp) -> Result<Bootcamp, AppError> {
        if !caller.is_admin() && self.repository.find_by_user(caller.id).await?.is_some() {
            return Err(AppError::validation(format!(
                "The user with ID {} has already published a bootcamp",
                caller.id
            )));
        }

        input.user_id = caller.id;
        let bootcamp = self.repository.create(input).await?;
        tracing::info!(bootcamp_id = bootcamp.id, user_id = caller.id, "bootcamp created");

        Ok(bootcamp)
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown id and
    /// [`AppError::Forbidden`] when the caller neither owns the bootcamp nor is
    /// an admin.
    pub async fn update(
        &self,
        caller: &Identity,
        id: i64,
        update: UpdateBootcamp,
    ) -> Result<Bootcamp, AppError> {
        let bootcamp = self.get(id).await?;
        caller.ensure_owner_or_admin(bootcamp.user_id, || {
            format!("User {} is not authorized to update this bootcamp", caller.id)
        })?;

        self.repository.update(id, update).await
    }

    pub async fn delete(&self, caller: &Identity, id: i64) -> Result<(), AppError> {
        let bootcamp = self.get(id).await?;
        caller.ensure_owner_or_admin(bootcamp.user_id, || {
            format!("User {} is not authorized to delete this bootcamp", caller.id)
        })?;

        if !self.repository.delete(id).await? {
            return Err(not_found(id));
        }
        tracing::info!(bootcamp_id = id, user_id = caller.id, "bootcamp deleted");

        Ok(())
    }
}

fn not_found(id: i64) -> AppError {
    AppError::not_found(format!("No bootcamp with the id of {id}"))
}
