//! Sample entities for service unit tests.

use chrono::Utc;

use crate::domain::entities::{Bootcamp, Course, MinimumSkill, Review, User};
use crate::domain::identity::Role;

pub fn bootcamp(id: i64, owner: i64) -> Bootcamp {
    Bootcamp {
        id,
        name: format!("Bootcamp {id}"),
        slug: format!("bootcamp-{id}"),
        description: "Full stack web development".into(),
        website: Some("https://devworks.com".into()),
        phone: None,
        email: None,
        address: "233 Bay State Rd Boston MA 02215".into(),
        latitude: Some(42.350_846),
        longitude: Some(-71.103_46),
        careers: vec!["Web Development".into()],
        average_rating: None,
        average_cost: None,
        photo: "no-photo.jpg".into(),
        housing: false,
        job_assistance: true,
        job_guarantee: false,
        accept_gi: true,
        user_id: owner,
        created_at: Utc::now(),
    }
}

pub fn course(id: i64, bootcamp_id: i64, owner: i64) -> Course {
    Course {
        id,
        title: format!("Course {id}"),
        description: "Learn the basics".into(),
        weeks: 8,
        tuition: 8000.0,
        minimum_skill: MinimumSkill::Beginner,
        scholarship_available: false,
        bootcamp_id,
        user_id: owner,
        created_at: Utc::now(),
    }
}

pub fn review(id: i64, bootcamp_id: i64, owner: i64) -> Review {
    Review {
        id,
        title: "Great bootcamp".into(),
        text: "Learned a lot".into(),
        rating: 9,
        bootcamp_id,
        user_id: owner,
        created_at: Utc::now(),
    }
}

pub fn user(id: i64, role: Role) -> User {
    User {
        id,
        name: format!("User {id}"),
        email: format!("user{id}@example.com"),
        role,
        password_hash: String::new(),
        created_at: Utc::now(),
    }
}
