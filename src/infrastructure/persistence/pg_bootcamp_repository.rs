//! PostgreSQL implementation of the bootcamp repository.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::sync::Arc;

use super::query_sql::{count_matching, fetch_page};
use crate::domain::entities::{Bootcamp, NewBootcamp, UpdateBootcamp, bootcamp, slugify};
use crate::domain::query::{Filter, QueryDescriptor, Resource};
use crate::domain::repositories::BootcampRepository;
use crate::error::AppError;

/// Mean earth radius in miles used by radius search.
const EARTH_RADIUS_MILES: f64 = 3963.2;

pub struct PgBootcampRepository {
    pool: Arc<PgPool>,
}

impl PgBootcampRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BootcampRepository for PgBootcampRepository {
    async fn find(&self, query: &QueryDescriptor<Bootcamp>) -> Result<Vec<Bootcamp>, AppError> {
        fetch_page(&self.pool, query).await
    }

    async fn count(&self, filter: &Filter) -> Result<u64, AppError> {
        count_matching(&self.pool, Bootcamp::TABLE, filter).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Bootcamp>, AppError> {
        let bootcamp = sqlx::query_as::<_, Bootcamp>("SELECT * FROM bootcamps WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(bootcamp)
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Bootcamp>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let bootcamps = sqlx::query_as::<_, Bootcamp>("SELECT * FROM bootcamps WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(bootcamps)
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Option<Bootcamp>, AppError> {
        let bootcamp = sqlx::query_as::<_, Bootcamp>(
            "SELECT * FROM bootcamps WHERE user_id = $1 ORDER BY id LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(bootcamp)
    }

    async fn find_within_radius(
        &self,
        latitude: f64,
        longitude: f64,
        radius_miles: f64,
    ) -> Result<Vec<Bootcamp>, AppError> {
        // Spherical law of cosines; LEAST/GREATEST keep acos inside its domain.
        let bootcamps = sqlx::query_as::<_, Bootcamp>(
            r#"
            SELECT * FROM bootcamps
            WHERE latitude IS NOT NULL
              AND longitude IS NOT NULL
              AND $4 * ACOS(LEAST(1.0, GREATEST(-1.0,
                    SIN(RADIANS($1)) * SIN(RADIANS(latitude))
                  + COS(RADIANS($1)) * COS(RADIANS(latitude)) * COS(RADIANS(longitude) - RADIANS($2))
                  ))) <= $3
            ORDER BY id
            "#,
        )
        .bind(latitude)
        .bind(longitude)
        .bind(radius_miles)
        .bind(EARTH_RADIUS_MILES)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(bootcamps)
    }

    async fn create(&self, new_bootcamp: NewBootcamp) -> Result<Bootcamp, AppError> {
        let slug = slugify(&new_bootcamp.name);

        let bootcamp = sqlx::query_as::<_, Bootcamp>(
            r#"
            INSERT INTO bootcamps (
                name, slug, description, website, phone, email, address,
                latitude, longitude, careers, photo,
                housing, job_assistance, job_guarantee, accept_gi, user_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING *
            "#,
        )
        .bind(new_bootcamp.name)
        .bind(slug)
        .bind(new_bootcamp.description)
        .bind(new_bootcamp.website)
        .bind(new_bootcamp.phone)
        .bind(new_bootcamp.email)
        .bind(new_bootcamp.address)
        .bind(new_bootcamp.latitude)
        .bind(new_bootcamp.longitude)
        .bind(new_bootcamp.careers)
        .bind(bootcamp::DEFAULT_PHOTO)
        .bind(new_bootcamp.housing)
        .bind(new_bootcamp.job_assistance)
        .bind(new_bootcamp.job_guarantee)
        .bind(new_bootcamp.accept_gi)
        .bind(new_bootcamp.user_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(bootcamp)
    }

    async fn update(&self, id: i64, update: UpdateBootcamp) -> Result<Bootcamp, AppError> {
        if update.is_empty() {
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("No bootcamp with the id of {id}")));
        }

        let mut qb = QueryBuilder::<Postgres>::new("UPDATE bootcamps SET ");
        {
            let mut set = qb.separated(", ");
            if let Some(name) = update.name {
                set.push("slug = ").push_bind_unseparated(slugify(&name));
                set.push("name = ").push_bind_unseparated(name);
            }
            if let Some(description) = update.description {
                set.push("description = ").push_bind_unseparated(description);
            }
            if let Some(website) = update.website {
                set.push("website = ").push_bind_unseparated(website);
            }
            if let Some(phone) = update.phone {
                set.push("phone = ").push_bind_unseparated(phone);
            }
            if let Some(email) = update.email {
                set.push("email = ").push_bind_unseparated(email);
            }
            if let Some(address) = update.address {
                set.push("address = ").push_bind_unseparated(address);
            }
            if let Some(latitude) = update.latitude {
                set.push("latitude = ").push_bind_unseparated(latitude);
            }
            if let Some(longitude) = update.longitude {
                set.push("longitude = ").push_bind_unseparated(longitude);
            }
            if let Some(careers) = update.careers {
                set.push("careers = ").push_bind_unseparated(careers);
            }
            if let Some(housing) = update.housing {
                set.push("housing = ").push_bind_unseparated(housing);
            }
            if let Some(job_assistance) = update.job_assistance {
                set.push("job_assistance = ").push_bind_unseparated(job_assistance);
            }
            if let Some(job_guarantee) = update.job_guarantee {
                set.push("job_guarantee = ").push_bind_unseparated(job_guarantee);
            }
            if let Some(accept_gi) = update.accept_gi {
                set.push("accept_gi = ").push_bind_unseparated(accept_gi);
            }
        }
        qb.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        qb.build_query_as::<Bootcamp>()
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::not_found(format!("No bootcamp with the id of {id}")))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        // courses and reviews go with it (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM bootcamps WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
