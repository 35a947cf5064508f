//! PostgreSQL implementation of the course repository.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use std::sync::Arc;

use super::query_sql::{count_matching, fetch_page};
use crate::domain::entities::{Course, NewCourse, UpdateCourse};
use crate::domain::query::{Filter, QueryDescriptor, Resource};
use crate::domain::repositories::CourseRepository;
use crate::error::AppError;

pub struct PgCourseRepository {
    pool: Arc<PgPool>,
}

impl PgCourseRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

/// Recomputes `average_cost` as the mean tuition rounded up to the next ten.
pub(crate) async fn refresh_average_cost(conn: &mut PgConnection, bootcamp_id: i64) -> Result<(), AppError> {
    sqlx::query(
        r#"
        UPDATE bootcamps
        SET average_cost = (
            SELECT CEIL(AVG(tuition) / 10) * 10 FROM courses WHERE bootcamp_id = $1
        )
        WHERE id = $1
        "#,
    )
    .bind(bootcamp_id)
    .execute(conn)
    .await?;

    Ok(())
}

#[async_trait]
impl CourseRepository for PgCourseRepository {
    async fn find(&self, query: &QueryDescriptor<Course>) -> Result<Vec<Course>, AppError> {
        fetch_page(&self.pool, query).await
    }

    async fn count(&self, filter: &Filter) -> Result<u64, AppError> {
        count_matching(&self.pool, Course::TABLE, filter).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Course>, AppError> {
        let course = sqlx::query_as::<_, Course>("SELECT * FROM courses WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(course)
    }

    async fn find_by_bootcamps(&self, bootcamp_ids: &[i64]) -> Result<Vec<Course>, AppError> {
        if bootcamp_ids.is_empty() {
            return Ok(Vec::new());
        }

        let courses = sqlx::query_as::<_, Course>(
            "SELECT * FROM courses WHERE bootcamp_id = ANY($1) ORDER BY created_at, id",
        )
        .bind(bootcamp_ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(courses)
    }

    async fn create(&self, new_course: NewCourse) -> Result<Course, AppError> {
        let mut tx = self.pool.begin().await?;

        let course = sqlx::query_as::<_, Course>(
            r#"
            INSERT INTO courses (
                title, description, weeks, tuition, minimum_skill,
                scholarship_available, bootcamp_id, user_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(new_course.title)
        .bind(new_course.description)
        .bind(new_course.weeks)
        .bind(new_course.tuition)
        .bind(new_course.minimum_skill.as_str())
        .bind(new_course.scholarship_available)
        .bind(new_course.bootcamp_id)
        .bind(new_course.user_id)
        .fetch_one(&mut *tx)
        .await?;

        refresh_average_cost(&mut tx, course.bootcamp_id).await?;
        tx.commit().await?;

        Ok(course)
    }

    async fn update(&self, id: i64, update: UpdateCourse) -> Result<Course, AppError> {
        let not_found = || AppError::not_found(format!("No course with the id of {id}"));

        if update.is_empty() {
            return self.find_by_id(id).await?.ok_or_else(not_found);
        }

        let mut qb = QueryBuilder::<Postgres>::new("UPDATE courses SET ");
        {
            let mut set = qb.separated(", ");
            if let Some(title) = update.title {
                set.push("title = ").push_bind_unseparated(title);
            }
            if let Some(description) = update.description {
                set.push("description = ").push_bind_unseparated(description);
            }
            if let Some(weeks) = update.weeks {
                set.push("weeks = ").push_bind_unseparated(weeks);
            }
            if let Some(tuition) = update.tuition {
                set.push("tuition = ").push_bind_unseparated(tuition);
            }
            if let Some(skill) = update.minimum_skill {
                set.push("minimum_skill = ")
                    .push_bind_unseparated(skill.as_str());
            }
            if let Some(scholarship) = update.scholarship_available {
                set.push("scholarship_available = ")
                    .push_bind_unseparated(scholarship);
            }
        }
        qb.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        let mut tx = self.pool.begin().await?;
        let course = qb
            .build_query_as::<Course>()
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(not_found)?;

        refresh_average_cost(&mut tx, course.bootcamp_id).await?;
        tx.commit().await?;

        Ok(course)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        let bootcamp_id: Option<i64> =
            sqlx::query_scalar("DELETE FROM courses WHERE id = $1 RETURNING bootcamp_id")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some(bootcamp_id) = bootcamp_id else {
            return Ok(false);
        };

        refresh_average_cost(&mut tx, bootcamp_id).await?;
        tx.commit().await?;

        Ok(true)
    }
}
