//! API route tables, mounted under `/api/v1`.
//!
//! Reads are public. Writes pass the access gate: `authenticate` first,
//! then `authorize` with the route's [`RoutePolicy`]. Ownership checks
//! happen in the services.

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::api::handlers::{auth, bootcamps, courses, health_handler, reviews, users};
use crate::api::middleware::auth::{authenticate, authorize};
use crate::domain::identity::{Role, RoutePolicy};
use crate::state::AppState;

const PUBLISHERS: RoutePolicy = RoutePolicy::new(&[Role::Publisher, Role::Admin]);
const REVIEWERS: RoutePolicy = RoutePolicy::new(&[Role::User, Role::Admin]);
const ADMINS: RoutePolicy = RoutePolicy::new(&[Role::Admin]);

/// Every API route, without rate limiting.
pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(resource_routes(state))
        .nest("/auth", auth_routes(state))
        .route("/health", get(health_handler))
}

/// Bootcamps, courses and reviews.
///
/// # Endpoints
///
/// - `GET    /bootcamps`                               - List bootcamps (public)
/// - `POST   /bootcamps`                               - Create (publisher, admin)
/// - `GET    /bootcamps/radius/{lat}/{lng}/{distance}` - Radius search (public)
/// - `GET    /bootcamps/{id}`                          - Get one (public)
/// - `PUT    /bootcamps/{id}`                          - Update (publisher, admin; owner)
/// - `DELETE /bootcamps/{id}`                          - Delete (publisher, admin; owner)
/// - `GET    /bootcamps/{id}/courses`                  - Courses of a bootcamp (public)
/// - `POST   /bootcamps/{id}/courses`                  - Add course (publisher, admin; owner)
/// - `GET    /bootcamps/{id}/reviews`                  - Reviews of a bootcamp (public)
/// - `POST   /bootcamps/{id}/reviews`                  - Add review (user, admin)
/// - `GET    /courses`, `/courses/{id}`                - Public reads
/// - `PUT    /courses/{id}`, `DELETE /courses/{id}`    - Publisher, admin; owner
/// - `GET    /reviews`, `/reviews/{id}`                - Public reads
/// - `GET    /reviews/me`                              - The caller's reviews
/// - `PUT    /reviews/{id}`, `DELETE /reviews/{id}`    - User, admin; owner
pub fn resource_routes(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/bootcamps", get(bootcamps::list_bootcamps))
        .route(
            "/bootcamps/radius/{lat}/{lng}/{distance}",
            get(bootcamps::bootcamps_in_radius),
        )
        .route("/bootcamps/{id}", get(bootcamps::get_bootcamp))
        .route("/bootcamps/{id}/courses", get(courses::list_bootcamp_courses))
        .route("/bootcamps/{id}/reviews", get(reviews::list_bootcamp_reviews))
        .route("/courses", get(courses::list_courses))
        .route("/courses/{id}", get(courses::get_course))
        .route("/reviews", get(reviews::list_reviews))
        .route("/reviews/{id}", get(reviews::get_review));

    let publishers = Router::new()
        .route("/bootcamps", post(bootcamps::create_bootcamp))
        .route(
            "/bootcamps/{id}",
            put(bootcamps::update_bootcamp).delete(bootcamps::delete_bootcamp),
        )
        .route("/bootcamps/{id}/courses", post(courses::create_course))
        .route(
            "/courses/{id}",
            put(courses::update_course).delete(courses::delete_course),
        );

    let reviewers = Router::new()
        .route("/bootcamps/{id}/reviews", post(reviews::create_review))
        .route(
            "/reviews/{id}",
            put(reviews::update_review).delete(reviews::delete_review),
        );

    let signed_in = Router::new().route("/reviews/me", get(reviews::my_reviews));

    public
        .merge(gated(state, PUBLISHERS, publishers))
        .merge(gated(state, REVIEWERS, reviewers))
        .merge(authenticated(state, signed_in))
}

/// Registration, login, the caller's account and admin user management.
///
/// # Endpoints
///
/// - `POST /register`, `POST /login`           - Public
/// - `GET  /me`, `GET /logout`                  - Signed in
/// - `PUT  /updatedetails`, `PUT /updatepassword` - Signed in
/// - `GET|POST /users`, `GET|PUT|DELETE /users/{id}` - Admin
pub fn auth_routes(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    let signed_in = Router::new()
        .route("/me", get(auth::me))
        .route("/logout", get(auth::logout))
        .route("/updatedetails", put(auth::update_details))
        .route("/updatepassword", put(auth::update_password));

    let admin = Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        );

    public
        .merge(authenticated(state, signed_in))
        .merge(gated(state, ADMINS, admin))
}

/// `authenticate` only.
fn authenticated(state: &AppState, router: Router<AppState>) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(state.clone(), authenticate))
}

/// `authenticate`, then `authorize(policy)`.
fn gated(state: &AppState, policy: RoutePolicy, router: Router<AppState>) -> Router<AppState> {
    let router = router.route_layer(middleware::from_fn_with_state(policy, authorize));
    authenticated(state, router)
}
