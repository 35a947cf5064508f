//! Shared application state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{
    AdvancedResults, AuthService, BootcampService, CourseService, JwtSettings, ReviewService,
    UserService,
};
use crate::domain::pagination::PagingDefaults;
use crate::domain::repositories::{
    BootcampRepository, CourseRepository, ReviewRepository, UserRepository,
};
use crate::infrastructure::persistence::{
    PgBootcampRepository, PgCourseRepository, PgReviewRepository, PgUserRepository,
};

/// Runtime settings the services and handlers need, derived from
/// [`crate::config::Config`].
#[derive(Debug, Clone)]
pub struct Settings {
    pub jwt: JwtSettings,
    pub bcrypt_cost: u32,
    pub paging: PagingDefaults,
    /// Adds `Secure` to the token cookie.
    pub secure_cookies: bool,
}

/// One implementation per repository trait.
#[derive(Clone)]
pub struct Repositories {
    pub bootcamps: Arc<dyn BootcampRepository>,
    pub courses: Arc<dyn CourseRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl Repositories {
    pub fn postgres(pool: Arc<PgPool>) -> Self {
        Self {
            bootcamps: Arc::new(PgBootcampRepository::new(pool.clone())),
            courses: Arc::new(PgCourseRepository::new(pool.clone())),
            reviews: Arc::new(PgReviewRepository::new(pool.clone())),
            users: Arc::new(PgUserRepository::new(pool)),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub bootcamp_service: Arc<BootcampService>,
    pub course_service: Arc<CourseService>,
    pub review_service: Arc<ReviewService>,
    pub user_service: Arc<UserService>,
    pub auth_service: Arc<AuthService>,
    pub paging: PagingDefaults,
    pub cookie_secure: bool,
}

impl AppState {
    /// State backed by PostgreSQL.
    pub fn new(pool: Arc<PgPool>, settings: &Settings) -> Self {
        Self::from_repositories(Repositories::postgres(pool), settings)
    }

    /// Wires services over any set of repositories.
    pub fn from_repositories(repos: Repositories, settings: &Settings) -> Self {
        let results = Arc::new(AdvancedResults::new(
            repos.bootcamps.clone(),
            repos.courses.clone(),
            repos.users.clone(),
        ));

        Self {
            bootcamp_service: Arc::new(BootcampService::new(
                repos.bootcamps.clone(),
                results.clone(),
            )),
            course_service: Arc::new(CourseService::new(
                repos.courses,
                repos.bootcamps.clone(),
                results.clone(),
            )),
            review_service: Arc::new(ReviewService::new(
                repos.reviews,
                repos.bootcamps,
                results.clone(),
            )),
            user_service: Arc::new(UserService::new(
                repos.users.clone(),
                results,
                settings.bcrypt_cost,
            )),
            auth_service: Arc::new(AuthService::new(
                repos.users,
                &settings.jwt,
                settings.bcrypt_cost,
            )),
            paging: settings.paging,
            cookie_secure: settings.secure_cookies,
        }
    }
}
