//! PostgreSQL implementation of the user repository.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::sync::Arc;

use super::pg_course_repository::refresh_average_cost;
use super::pg_review_repository::refresh_average_rating;
use super::query_sql::{count_matching, fetch_page};
use crate::domain::entities::{NewUser, UpdateUser, User};
use crate::domain::query::{Filter, QueryDescriptor, Resource};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

pub struct PgUserRepository {
    pool: Arc<PgPool>,
}

impl PgUserRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find(&self, query: &QueryDescriptor<User>) -> Result<Vec<User>, AppError> {
        fetch_page(&self.pool, query).await
    }

    async fn count(&self, filter: &Filter) -> Result<u64, AppError> {
        count_matching(&self.pool, User::TABLE, filter).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(user)
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<User>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let users = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(users)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(user)
    }

    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, role, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(new_user.name)
        .bind(new_user.email)
        .bind(new_user.role.as_str())
        .bind(new_user.password_hash)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(user)
    }

    async fn update(&self, id: i64, update: UpdateUser) -> Result<User, AppError> {
        let not_found = || AppError::not_found(format!("No user with the id of {id}"));

        if update.is_empty() {
            return self.find_by_id(id).await?.ok_or_else(not_found);
        }

        let mut qb = QueryBuilder::<Postgres>::new("UPDATE users SET ");
        {
            let mut set = qb.separated(", ");
            if let Some(name) = update.name {
                set.push("name = ").push_bind_unseparated(name);
            }
            if let Some(email) = update.email {
                set.push("email = ").push_bind_unseparated(email);
            }
            if let Some(role) = update.role {
                set.push("role = ").push_bind_unseparated(role.as_str());
            }
        }
        qb.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        qb.build_query_as::<User>()
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or_else(not_found)
    }

    async fn set_password(&self, id: i64, password_hash: String) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("No user with the id of {id}")));
        }

        Ok(())
    }

    /// Deletes the user with everything they own. Bootcamps that lose a
    /// review or a course by this user get their averages recomputed.
    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut rated: Vec<i64> =
            sqlx::query_scalar("DELETE FROM reviews WHERE user_id = $1 RETURNING bootcamp_id")
                .bind(id)
                .fetch_all(&mut *tx)
                .await?;
        let mut priced: Vec<i64> =
            sqlx::query_scalar("DELETE FROM courses WHERE user_id = $1 RETURNING bootcamp_id")
                .bind(id)
                .fetch_all(&mut *tx)
                .await?;

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        // Bootcamps owned by the user are already gone; refreshing them is a no-op.
        rated.sort_unstable();
        rated.dedup();
        for bootcamp_id in rated {
            refresh_average_rating(&mut tx, bootcamp_id).await?;
        }
        priced.sort_unstable();
        priced.dedup();
        for bootcamp_id in priced {
            refresh_average_cost(&mut tx, bootcamp_id).await?;
        }

        tx.commit().await?;
        Ok(true)
    }
}
