#![allow(dead_code)]

//! In-memory repositories and server helpers for the HTTP tests.
//!
//! [`MemoryStore`] implements every repository trait over plain vectors and
//! mirrors the PostgreSQL behaviour the handlers rely on: unique bootcamp
//! names and emails, one review per user and bootcamp, cascading deletes and the
//! bootcamp averages.

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::cmp::Ordering;
use std::sync::{Arc, Mutex, MutexGuard};

use devcamper_api::api;
use devcamper_api::application::services::JwtSettings;
use devcamper_api::domain::entities::{
    Bootcamp, Course, NewBootcamp, NewCourse, NewReview, NewUser, Review, UpdateBootcamp,
    UpdateCourse, UpdateReview, UpdateUser, User, bootcamp, slugify,
};
use devcamper_api::domain::identity::Role;
use devcamper_api::domain::pagination::PagingDefaults;
use devcamper_api::domain::query::{
    Condition, Direction, FieldKind, Filter, FilterValue, Operand, Operator, QueryDescriptor,
    Resource, SortKey,
};
use devcamper_api::domain::repositories::{
    BootcampRepository, CourseRepository, ReviewRepository, UserRepository,
};
use devcamper_api::error::AppError;
use devcamper_api::routes;
use devcamper_api::state::{AppState, Repositories, Settings};

pub const PASSWORD: &str = "123456";

const EARTH_RADIUS_MILES: f64 = 3963.2;

#[derive(Default)]
struct Tables {
    bootcamps: Vec<Bootcamp>,
    courses: Vec<Course>,
    reviews: Vec<Review>,
    users: Vec<User>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn refresh_average_cost(&mut self, bootcamp_id: i64) {
        let tuitions: Vec<f64> = self
            .courses
            .iter()
            .filter(|c| c.bootcamp_id == bootcamp_id)
            .map(|c| c.tuition)
            .collect();
        let average = mean(&tuitions).map(|avg| (avg / 10.0).ceil() * 10.0);

        if let Some(bootcamp) = self.bootcamps.iter_mut().find(|b| b.id == bootcamp_id) {
            bootcamp.average_cost = average;
        }
    }

    fn refresh_average_rating(&mut self, bootcamp_id: i64) {
        let ratings: Vec<f64> = self
            .reviews
            .iter()
            .filter(|r| r.bootcamp_id == bootcamp_id)
            .map(|r| f64::from(r.rating))
            .collect();
        let average = mean(&ratings);

        if let Some(bootcamp) = self.bootcamps.iter_mut().find(|b| b.id == bootcamp_id) {
            bootcamp.average_rating = average;
        }
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
}

/// Shared tables behind all four repository traits.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }

    pub fn repositories(self: &Arc<Self>) -> Repositories {
        Repositories {
            bootcamps: self.clone(),
            courses: self.clone(),
            reviews: self.clone(),
            users: self.clone(),
        }
    }

    pub fn bootcamp(&self, id: i64) -> Option<Bootcamp> {
        self.lock().bootcamps.iter().find(|b| b.id == id).cloned()
    }

    pub fn course_count(&self) -> usize {
        self.lock().courses.len()
    }

    pub fn review_count(&self) -> usize {
        self.lock().reviews.len()
    }
}

/// Filters, sorts and pages `rows` the way `query_sql` does in SQL.
fn run_query<R: Resource + Serialize + Clone>(rows: &[R], query: &QueryDescriptor<R>) -> Vec<R> {
    let mut matching: Vec<(Value, R)> = rows
        .iter()
        .map(|row| (to_doc(row), row.clone()))
        .filter(|(doc, _)| matches_filter(doc, &query.filter))
        .collect();

    matching.sort_by(|(a, ra), (b, rb)| {
        query
            .sort
            .iter()
            .map(|key| compare_by_key(a, b, key))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or_else(|| ra.id().cmp(&rb.id()))
    });

    let start = usize::try_from(query.page.start_index()).unwrap();
    matching
        .into_iter()
        .skip(start)
        .take(query.page.limit as usize)
        .map(|(_, row)| row)
        .collect()
}

fn count_matching<R: Serialize>(rows: &[R], filter: &Filter) -> u64 {
    rows.iter()
        .filter(|row| matches_filter(&to_doc(*row), filter))
        .count() as u64
}

fn to_doc<R: Serialize>(row: &R) -> Value {
    serde_json::to_value(row).unwrap()
}

fn matches_filter(doc: &Value, filter: &Filter) -> bool {
    filter
        .conditions()
        .iter()
        .all(|condition| matches_condition(&doc[condition.field.name], condition))
}

fn matches_condition(value: &Value, condition: &Condition) -> bool {
    if condition.field.kind == FieldKind::TextList {
        let items: Vec<&str> = value
            .as_array()
            .map(|a| a.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();
        let contains = |v: &FilterValue| matches!(v, FilterValue::Text(t) if items.contains(&t.as_str()));

        return match &condition.operand {
            Operand::One(v) => contains(v),
            Operand::Many(vs) => vs.iter().any(contains),
        };
    }

    match &condition.operand {
        Operand::One(target) => compare_value(value, target)
            .is_some_and(|ord| operator_holds(condition.operator, ord)),
        Operand::Many(targets) => targets
            .iter()
            .any(|t| compare_value(value, t) == Some(Ordering::Equal)),
    }
}

fn operator_holds(operator: Operator, ord: Ordering) -> bool {
    match operator {
        Operator::Eq | Operator::In => ord == Ordering::Equal,
        Operator::Gt => ord == Ordering::Greater,
        Operator::Gte => ord != Ordering::Less,
        Operator::Lt => ord == Ordering::Less,
        Operator::Lte => ord != Ordering::Greater,
    }
}

fn compare_value(value: &Value, target: &FilterValue) -> Option<Ordering> {
    match target {
        FilterValue::Text(t) => value.as_str().map(|s| s.cmp(t.as_str())),
        FilterValue::Integer(i) => value.as_i64().map(|v| v.cmp(i)),
        FilterValue::Float(f) => value.as_f64().and_then(|v| v.partial_cmp(f)),
        FilterValue::Boolean(b) => value.as_bool().map(|v| v.cmp(b)),
        FilterValue::Timestamp(ts) => timestamp(value).map(|v| v.cmp(ts)),
    }
}

fn timestamp(value: &Value) -> Option<DateTime<Utc>> {
    value
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|ts| ts.with_timezone(&Utc))
}

/// Nulls compare greater than any value, as in PostgreSQL.
fn compare_by_key(a: &Value, b: &Value, key: &SortKey) -> Ordering {
    let (a, b) = (&a[key.field.name], &b[key.field.name]);
    let ord = match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => match key.field.kind {
            FieldKind::Integer | FieldKind::Float => a
                .as_f64()
                .zip(b.as_f64())
                .and_then(|(x, y)| x.partial_cmp(&y))
                .unwrap_or(Ordering::Equal),
            FieldKind::Boolean => a.as_bool().cmp(&b.as_bool()),
            FieldKind::Timestamp => timestamp(a).cmp(&timestamp(b)),
            FieldKind::Text | FieldKind::TextList => a.to_string().cmp(&b.to_string()),
        },
    };

    match key.direction {
        Direction::Asc => ord,
        Direction::Desc => ord.reverse(),
    }
}

fn distance_miles(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let (lat1, lat2) = (lat1.to_radians(), lat2.to_radians());
    let cos = lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * (lng2 - lng1).to_radians().cos();
    EARTH_RADIUS_MILES * cos.clamp(-1.0, 1.0).acos()
}

fn duplicate(field: &str, value: &str) -> AppError {
    AppError::duplicate(format!(
        "Duplicate field value entered: Key ({field})=({value}) already exists."
    ))
}

#[async_trait]
impl BootcampRepository for MemoryStore {
    async fn find(&self, query: &QueryDescriptor<Bootcamp>) -> Result<Vec<Bootcamp>, AppError> {
        Ok(run_query(&self.lock().bootcamps, query))
    }

    async fn count(&self, filter: &Filter) -> Result<u64, AppError> {
        Ok(count_matching(&self.lock().bootcamps, filter))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Bootcamp>, AppError> {
        Ok(self.bootcamp(id))
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Bootcamp>, AppError> {
        let tables = self.lock();
        Ok(tables
            .bootcamps
            .iter()
            .filter(|b| ids.contains(&b.id))
            .cloned()
            .collect())
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Option<Bootcamp>, AppError> {
        let tables = self.lock();
        Ok(tables.bootcamps.iter().find(|b| b.user_id == user_id).cloned())
    }

    async fn find_within_radius(
        &self,
        latitude: f64,
        longitude: f64,
        radius_miles: f64,
    ) -> Result<Vec<Bootcamp>, AppError> {
        let tables = self.lock();
        Ok(tables
            .bootcamps
            .iter()
            .filter(|b| match (b.latitude, b.longitude) {
                (Some(lat), Some(lng)) => {
                    distance_miles(latitude, longitude, lat, lng) <= radius_miles
                }
                _ => false,
            })
            .cloned()
            .collect())
    }

    async fn create(&self, new_bootcamp: NewBootcamp) -> Result<Bootcamp, AppError> {
        let mut tables = self.lock();
        let slug = slugify(&new_bootcamp.name);

        if tables.bootcamps.iter().any(|b| b.name == new_bootcamp.name) {
            return Err(duplicate("name", &new_bootcamp.name));
        }

        let bootcamp = Bootcamp {
            id: tables.next_id(),
            name: new_bootcamp.name,
            slug,
            description: new_bootcamp.description,
            website: new_bootcamp.website,
            phone: new_bootcamp.phone,
            email: new_bootcamp.email,
            address: new_bootcamp.address,
            latitude: new_bootcamp.latitude,
            longitude: new_bootcamp.longitude,
            careers: new_bootcamp.careers,
            average_rating: None,
            average_cost: None,
            photo: bootcamp::DEFAULT_PHOTO.into(),
            housing: new_bootcamp.housing,
            job_assistance: new_bootcamp.job_assistance,
            job_guarantee: new_bootcamp.job_guarantee,
            accept_gi: new_bootcamp.accept_gi,
            user_id: new_bootcamp.user_id,
            created_at: Utc::now(),
        };
        tables.bootcamps.push(bootcamp.clone());

        Ok(bootcamp)
    }

    async fn update(&self, id: i64, update: UpdateBootcamp) -> Result<Bootcamp, AppError> {
        let mut tables = self.lock();

        if let Some(name) = &update.name {
            if tables.bootcamps.iter().any(|b| b.id != id && b.name == *name) {
                return Err(duplicate("name", name));
            }
        }

        let bootcamp = tables
            .bootcamps
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::not_found(format!("No bootcamp with the id of {id}")))?;

        if let Some(name) = update.name {
            bootcamp.slug = slugify(&name);
            bootcamp.name = name;
        }
        if let Some(description) = update.description {
            bootcamp.description = description;
        }
        if let Some(website) = update.website {
            bootcamp.website = website;
        }
        if let Some(phone) = update.phone {
            bootcamp.phone = phone;
        }
        if let Some(email) = update.email {
            bootcamp.email = email;
        }
        if let Some(address) = update.address {
            bootcamp.address = address;
        }
        if let Some(latitude) = update.latitude {
            bootcamp.latitude = latitude;
        }
        if let Some(longitude) = update.longitude {
            bootcamp.longitude = longitude;
        }
        if let Some(careers) = update.careers {
            bootcamp.careers = careers;
        }
        if let Some(housing) = update.housing {
            bootcamp.housing = housing;
        }
        if let Some(job_assistance) = update.job_assistance {
            bootcamp.job_assistance = job_assistance;
        }
        if let Some(job_guarantee) = update.job_guarantee {
            bootcamp.job_guarantee = job_guarantee;
        }
        if let Some(accept_gi) = update.accept_gi {
            bootcamp.accept_gi = accept_gi;
        }

        Ok(bootcamp.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tables = self.lock();
        let before = tables.bootcamps.len();

        tables.bootcamps.retain(|b| b.id != id);
        tables.courses.retain(|c| c.bootcamp_id != id);
        tables.reviews.retain(|r| r.bootcamp_id != id);

        Ok(tables.bootcamps.len() < before)
    }
}

#[async_trait]
impl CourseRepository for MemoryStore {
    async fn find(&self, query: &QueryDescriptor<Course>) -> Result<Vec<Course>, AppError> {
        Ok(run_query(&self.lock().courses, query))
    }

    async fn count(&self, filter: &Filter) -> Result<u64, AppError> {
        Ok(count_matching(&self.lock().courses, filter))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Course>, AppError> {
        Ok(self.lock().courses.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_bootcamps(&self, bootcamp_ids: &[i64]) -> Result<Vec<Course>, AppError> {
        let tables = self.lock();
        Ok(tables
            .courses
            .iter()
            .filter(|c| bootcamp_ids.contains(&c.bootcamp_id))
            .cloned()
            .collect())
    }

    async fn create(&self, new_course: NewCourse) -> Result<Course, AppError> {
        let mut tables = self.lock();

        if !tables.bootcamps.iter().any(|b| b.id == new_course.bootcamp_id) {
            return Err(AppError::validation(format!(
                "Key (bootcamp_id)=({}) is not present in table \"bootcamps\".",
                new_course.bootcamp_id
            )));
        }

        let course = Course {
            id: tables.next_id(),
            title: new_course.title,
            description: new_course.description,
            weeks: new_course.weeks,
            tuition: new_course.tuition,
            minimum_skill: new_course.minimum_skill,
            scholarship_available: new_course.scholarship_available,
            bootcamp_id: new_course.bootcamp_id,
            user_id: new_course.user_id,
            created_at: Utc::now(),
        };
        tables.courses.push(course.clone());
        tables.refresh_average_cost(course.bootcamp_id);

        Ok(course)
    }

    async fn update(&self, id: i64, update: UpdateCourse) -> Result<Course, AppError> {
        let mut tables = self.lock();
        let course = tables
            .courses
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::not_found(format!("No course with the id of {id}")))?;

        if let Some(title) = update.title {
            course.title = title;
        }
        if let Some(description) = update.description {
            course.description = description;
        }
        if let Some(weeks) = update.weeks {
            course.weeks = weeks;
        }
        if let Some(tuition) = update.tuition {
            course.tuition = tuition;
        }
        if let Some(minimum_skill) = update.minimum_skill {
            course.minimum_skill = minimum_skill;
        }
        if let Some(scholarship_available) = update.scholarship_available {
            course.scholarship_available = scholarship_available;
        }

        let course = course.clone();
        tables.refresh_average_cost(course.bootcamp_id);

        Ok(course)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tables = self.lock();
        let Some(index) = tables.courses.iter().position(|c| c.id == id) else {
            return Ok(false);
        };

        let course = tables.courses.remove(index);
        tables.refresh_average_cost(course.bootcamp_id);

        Ok(true)
    }
}

#[async_trait]
impl ReviewRepository for MemoryStore {
    async fn find(&self, query: &QueryDescriptor<Review>) -> Result<Vec<Review>, AppError> {
        Ok(run_query(&self.lock().reviews, query))
    }

    async fn count(&self, filter: &Filter) -> Result<u64, AppError> {
        Ok(count_matching(&self.lock().reviews, filter))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Review>, AppError> {
        Ok(self.lock().reviews.iter().find(|r| r.id == id).cloned())
    }

    async fn create(&self, new_review: NewReview) -> Result<Review, AppError> {
        let mut tables = self.lock();

        if tables
            .reviews
            .iter()
            .any(|r| r.bootcamp_id == new_review.bootcamp_id && r.user_id == new_review.user_id)
        {
            return Err(duplicate(
                "bootcamp_id, user_id",
                &format!("{}, {}", new_review.bootcamp_id, new_review.user_id),
            ));
        }

        let review = Review {
            id: tables.next_id(),
            title: new_review.title,
            text: new_review.text,
            rating: new_review.rating,
            bootcamp_id: new_review.bootcamp_id,
            user_id: new_review.user_id,
            created_at: Utc::now(),
        };
        tables.reviews.push(review.clone());
        tables.refresh_average_rating(review.bootcamp_id);

        Ok(review)
    }

    async fn update(&self, id: i64, update: UpdateReview) -> Result<Review, AppError> {
        let mut tables = self.lock();
        let review = tables
            .reviews
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::not_found(format!("No review with the id of {id}")))?;

        if let Some(title) = update.title {
            review.title = title;
        }
        if let Some(text) = update.text {
            review.text = text;
        }
        if let Some(rating) = update.rating {
            review.rating = rating;
        }

        let review = review.clone();
        tables.refresh_average_rating(review.bootcamp_id);

        Ok(review)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tables = self.lock();
        let Some(index) = tables.reviews.iter().position(|r| r.id == id) else {
            return Ok(false);
        };

        let review = tables.reviews.remove(index);
        tables.refresh_average_rating(review.bootcamp_id);

        Ok(true)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find(&self, query: &QueryDescriptor<User>) -> Result<Vec<User>, AppError> {
        Ok(run_query(&self.lock().users, query))
    }

    async fn count(&self, filter: &Filter) -> Result<u64, AppError> {
        Ok(count_matching(&self.lock().users, filter))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.lock().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<User>, AppError> {
        let tables = self.lock();
        Ok(tables
            .users
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let tables = self.lock();
        Ok(tables
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut tables = self.lock();

        if tables
            .users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&new_user.email))
        {
            return Err(duplicate("email", &new_user.email));
        }

        let user = User {
            id: tables.next_id(),
            name: new_user.name,
            email: new_user.email,
            role: new_user.role,
            password_hash: new_user.password_hash,
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());

        Ok(user)
    }

    async fn update(&self, id: i64, update: UpdateUser) -> Result<User, AppError> {
        let mut tables = self.lock();

        if let Some(email) = &update.email {
            if tables
                .users
                .iter()
                .any(|u| u.id != id && u.email.eq_ignore_ascii_case(email))
            {
                return Err(duplicate("email", email));
            }
        }

        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::not_found(format!("No user with the id of {id}")))?;

        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(role) = update.role {
            user.role = role;
        }

        Ok(user.clone())
    }

    async fn set_password(&self, id: i64, password_hash: String) -> Result<(), AppError> {
        let mut tables = self.lock();
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::not_found(format!("No user with the id of {id}")))?;

        user.password_hash = password_hash;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tables = self.lock();
        let before = tables.users.len();

        tables.users.retain(|u| u.id != id);
        if tables.users.len() == before {
            return Ok(false);
        }

        let rated: Vec<i64> = tables
            .reviews
            .iter()
            .filter(|r| r.user_id == id)
            .map(|r| r.bootcamp_id)
            .collect();
        let priced: Vec<i64> = tables
            .courses
            .iter()
            .filter(|c| c.user_id == id)
            .map(|c| c.bootcamp_id)
            .collect();

        tables.bootcamps.retain(|b| b.user_id != id);
        let bootcamps: Vec<i64> = tables.bootcamps.iter().map(|b| b.id).collect();
        tables.courses.retain(|c| c.user_id != id && bootcamps.contains(&c.bootcamp_id));
        tables.reviews.retain(|r| r.user_id != id && bootcamps.contains(&r.bootcamp_id));

        for bootcamp_id in rated {
            tables.refresh_average_rating(bootcamp_id);
        }
        for bootcamp_id in priced {
            tables.refresh_average_cost(bootcamp_id);
        }

        Ok(true)
    }
}

pub fn test_settings() -> Settings {
    Settings {
        jwt: JwtSettings {
            secret: "test-secret".into(),
            expire_hours: 1,
        },
        bcrypt_cost: 4,
        paging: PagingDefaults::default(),
        secure_cookies: false,
    }
}

/// A test server over a fresh in-memory store.
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = MemoryStore::new();
        let state = AppState::from_repositories(store.repositories(), &test_settings());

        let app: Router = routes::mount(api::routes::routes(&state)).with_state(state.clone());
        let server = TestServer::new(app).unwrap();

        Self {
            server,
            state,
            store,
        }
    }

    /// Stores an account with [`PASSWORD`] and returns it with a token.
    pub async fn user(&self, name: &str, role: Role) -> (User, String) {
        let email = format!("{}@example.com", name.to_lowercase().replace(' ', "."));
        let user = UserRepository::create(
            self.store.as_ref(),
            NewUser {
                name: name.into(),
                email,
                role,
                password_hash: bcrypt::hash(PASSWORD, 4).unwrap(),
            },
        )
        .await
        .unwrap();

        let token = self.state.auth_service.issue_token(&user).unwrap();
        (user, token)
    }

    /// Stores a bootcamp owned by `owner_id`.
    pub async fn bootcamp(&self, owner_id: i64, name: &str, careers: &[&str]) -> Bootcamp {
        let mut input = new_bootcamp(name, owner_id);
        input.website = Some("https://example.com".into());
        input.job_assistance = true;
        input.accept_gi = true;
        input.careers = careers.iter().map(|c| c.to_string()).collect();

        BootcampRepository::create(self.store.as_ref(), input)
            .await
            .unwrap()
    }
}

/// Inserts an account through the PostgreSQL repository.
pub async fn pg_user(pool: &sqlx::PgPool, name: &str, role: Role) -> User {
    use devcamper_api::infrastructure::persistence::PgUserRepository;

    let repo = PgUserRepository::new(Arc::new(pool.clone()));
    UserRepository::create(
        &repo,
        NewUser {
            name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
            role,
            password_hash: "$2b$04$hash".into(),
        },
    )
    .await
    .unwrap()
}

pub fn new_bootcamp(name: &str, user_id: i64) -> NewBootcamp {
    NewBootcamp {
        name: name.into(),
        description: format!("{name} description"),
        website: None,
        phone: None,
        email: None,
        address: "233 Bay State Rd Boston MA 02215".into(),
        latitude: Some(42.350846),
        longitude: Some(-71.10396),
        careers: vec!["Web Development".into()],
        housing: false,
        job_assistance: false,
        job_guarantee: false,
        accept_gi: false,
        user_id,
    }
}
