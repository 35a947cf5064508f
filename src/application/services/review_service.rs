//! Review listing and owner-checked writes.

use serde_json::Value;
use std::sync::Arc;

use super::advanced_results::AdvancedResults;
use crate::domain::entities::{NewReview, Review, UpdateReview};
use crate::domain::identity::Identity;
use crate::domain::pagination::Page;
use crate::domain::query::{Populate, QueryDescriptor};
use crate::domain::repositories::{BootcampRepository, ReviewRepository};
use crate::error::AppError;

pub struct ReviewService {
    repository: Arc<dyn ReviewRepository>,
    bootcamps: Arc<dyn BootcampRepository>,
    results: Arc<AdvancedResults>,
}

impl ReviewService {
    pub fn new(
        repository: Arc<dyn ReviewRepository>,
        bootcamps: Arc<dyn BootcampRepository>,
        results: Arc<AdvancedResults>,
    ) -> Self {
        Self {
            repository,
            bootcamps,
            results,
        }
    }

    pub async fn list(&self, query: &QueryDescriptor<Review>) -> Result<Page<Value>, AppError> {
        self.results
            .collect(
                query,
                self.repository.find(query),
                self.repository.count(&query.filter),
            )
            .await
    }

    pub async fn get(&self, id: i64, populate: &[Populate]) -> Result<Value, AppError> {
        let review = self.find(id).await?;
        self.results.document(&review, populate).await
    }

    /// Adds the caller's review of a bootcamp.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the bootcamp does not exist and
    /// [`AppError::DuplicateKey`] if the caller already reviewed it.
    pub async fn create(
        &self,
        caller: &Identity,
        bootcamp_id: i64,
        mut input: NewReview,
    ) -> Result<Review, AppError> {
        if self.bootcamps.find_by_id(bootcamp_id).await?.is_none() {
            return Err(AppError::not_found(format!(
                "No bootcamp with the id of {bootcamp_id}"
            )));
        }

        input.bootcamp_id = bootcamp_id;
        input.user_id = caller.id;
        self.repository.create(input).await
    }

    pub async fn update(
        &self,
        caller: &Identity,
        id: i64,
        update: UpdateReview,
    ) -> Result<Review, AppError> {
        let review = self.find(id).await?;
        caller.ensure_owner_or_admin(review.user_id, || {
            "Not authorized to update review".to_string()
        })?;

        self.repository.update(id, update).await
    }

    pub async fn delete(&self, caller: &Identity, id: i64) -> Result<(), AppError> {
        let review = self.find(id).await?;
        caller.ensure_owner_or_admin(review.user_id, || {
            "Not authorized to delete review".to_string()
        })?;

        if !self.repository.delete(id).await? {
            return Err(not_found(id));
        }

        Ok(())
    }

    async fn find(&self, id: i64) -> Result<Review, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }
}

fn not_found(id: i64) -> AppError {
    AppError::not_found(format!("No review found with the id of {id}"))
}
