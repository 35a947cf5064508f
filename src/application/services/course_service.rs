//! Course listing and owner-checked writes.

use serde_json::Value;
use std::sync::Arc;

use super::advanced_results::AdvancedResults;
use crate::domain::entities::{Course, NewCourse, UpdateCourse};
use crate::domain::identity::Identity;
use crate::domain::pagination::Page;
use crate::domain::query::{Populate, QueryDescriptor};
use crate::domain::repositories::{BootcampRepository, CourseRepository};
use crate::error::AppError;

pub struct CourseService {
    repository: Arc<dyn CourseRepository>,
    bootcamps: Arc<dyn BootcampRepository>,
    results: Arc<AdvancedResults>,
}

impl CourseService {
    pub fn new(
        repository: Arc<dyn CourseRepository>,
        bootcamps: Arc<dyn BootcampRepository>,
        results: Arc<AdvancedResults>,
    ) -> Self {
        Self {
            repository,
            bootcamps,
            results,
        }
    }

    pub async fn list(&self, query: &QueryDescriptor<Course>) -> Result<Page<Value>, AppError> {
        self.results
            .collect(
                query,
                self.repository.find(query),
                self.repository.count(&query.filter),
            )
            .await
    }

    /// Loads one course and embeds `populate`.
    pub async fn get(&self, id: i64, populate: &[Populate]) -> Result<Value, AppError> {
        let course = self.find(id).await?;
        self.results.document(&course, populate).await
    }

    /// Adds a course to a bootcamp the caller owns.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the bootcamp does not exist and
    /// [`AppError::Forbidden`] if the caller neither owns it nor is an admin.
    pub async fn create(
        &self,
        caller: &Identity,
        bootcamp_id: i64,
        mut input: NewCourse,
    ) -> Result<Course, AppError> {
        let bootcamp = self
            .bootcamps
            .find_by_id(bootcamp_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("No bootcamp with the id of {bootcamp_id}"))
            })?;

        caller.ensure_owner_or_admin(bootcamp.user_id, || {
            format!(
                "User {} is not authorized to add a course to bootcamp {}",
                caller.id, bootcamp.id
            )
        })?;

        input.bootcamp_id = bootcamp.id;
        input.user_id = caller.id;
        self.repository.create(input).await
    }

    pub async fn update(
        &self,
        caller: &Identity,
        id: i64,
        update: UpdateCourse,
    ) -> Result<Course, AppError> {
        let course = self.find(id).await?;
        caller.ensure_owner_or_admin(course.user_id, || {
            format!("User {} is not authorized to update course {}", caller.id, id)
        })?;

        self.repository.update(id, update).await
    }

    pub async fn delete(&self, caller: &Identity, id: i64) -> Result<(), AppError> {
        let course = self.find(id).await?;
        caller.ensure_owner_or_admin(course.user_id, || {
            format!("User {} is not authorized to delete course {}", caller.id, id)
        })?;

        if !self.repository.delete(id).await? {
            return Err(not_found(id));
        }

        Ok(())
    }

    async fn find(&self, id: i64) -> Result<Course, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }
}

fn not_found(id: i64) -> AppError {
    AppError::not_found(format!("No course with the id of {id}"))
}
