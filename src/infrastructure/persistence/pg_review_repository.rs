//! PostgreSQL implementation of the review repository.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use std::sync::Arc;

use super::query_sql::{count_matching, fetch_page};
use crate::domain::entities::{NewReview, Review, UpdateReview};
use crate::domain::query::{Filter, QueryDescriptor, Resource};
use crate::domain::repositories::ReviewRepository;
use crate::error::AppError;

pub struct PgReviewRepository {
    pool: Arc<PgPool>,
}

impl PgReviewRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

pub(crate) async fn refresh_average_rating(conn: &mut PgConnection, bootcamp_id: i64) -> Result<(), AppError> {
    sqlx::query(
        r#"
        UPDATE bootcamps
        SET average_rating = (
            SELECT AVG(rating)::DOUBLE PRECISION FROM reviews WHERE bootcamp_id = $1
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
impl ReviewRepository for PgReviewRepository {
    async fn find(&self, query: &QueryDescriptor<Review>) -> Result<Vec<Review>, AppError> {
        fetch_page(&self.pool, query).await
    }

    async fn count(&self, filter: &Filter) -> Result<u64, AppError> {
        count_matching(&self.pool, Review::TABLE, filter).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Review>, AppError> {
        let review = sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(review)
    }

    async fn create(&self, new_review: NewReview) -> Result<Review, AppError> {
        let mut tx = self.pool.begin().await?;

        let review = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (title, text, rating, bootcamp_id, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(new_review.title)
        .bind(new_review.text)
        .bind(new_review.rating)
        .bind(new_review.bootcamp_id)
        .bind(new_review.user_id)
        .fetch_one(&mut *tx)
        .await?;

        refresh_average_rating(&mut tx, review.bootcamp_id).await?;
        tx.commit().await?;

        Ok(review)
    }

    async fn update(&self, id: i64, update: UpdateReview) -> Result<Review, AppError> {
        let not_found = || AppError::not_found(format!("No review with the id of {id}"));

        if update.is_empty() {
            return self.find_by_id(id).await?.ok_or_else(not_found);
        }

        let mut qb = QueryBuilder::<Postgres>::new("UPDATE reviews SET ");
        {
            let mut set = qb.separated(", ");
            if let Some(title) = update.title {
                set.push("title = ").push_bind_unseparated(title);
            }
            if let Some(text) = update.text {
                set.push("text = ").push_bind_unseparated(text);
            }
            if let Some(rating) = update.rating {
                set.push("rating = ").push_bind_unseparated(rating);
            }
        }
        qb.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        let mut tx = self.pool.begin().await?;
        let review = qb
            .build_query_as::<Review>()
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(not_found)?;

        refresh_average_rating(&mut tx, review.bootcamp_id).await?;
        tx.commit().await?;

        Ok(review)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        let bootcamp_id: Option<i64> =
            sqlx::query_scalar("DELETE FROM reviews WHERE id = $1 RETURNING bootcamp_id")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some(bootcamp_id) = bootcamp_id else {
            return Ok(false);
        };

        refresh_average_rating(&mut tx, bootcamp_id).await?;
        tx.commit().await?;

        Ok(true)
    }
}
