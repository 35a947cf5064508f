//! Request bodies for course endpoints.

use serde::Deserialize;
use validator::Validate;

use crate::domain::entities::{MinimumSkill, NewCourse, UpdateCourse};

/// Body of `POST /bootcamps/{id}/courses`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Please add a course title"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Please add a description"))]
    pub description: String,

    #[validate(range(min = 1, message = "Please add number of weeks"))]
    pub weeks: i32,

    #[validate(range(min = 0.0, message = "Please add a tuition cost"))]
    pub tuition: f64,

    pub minimum_skill: MinimumSkill,

    #[serde(default)]
    pub scholarship_available: bool,
}

impl CreateCourseRequest {
    /// The bootcamp and owner are filled in by the service.
    pub fn into_new(self, bootcamp_id: i64, owner_id: i64) -> NewCourse {
        NewCourse {
            title: self.title,
            description: self.description,
            weeks: self.weeks,
            tuition: self.tuition,
            minimum_skill: self.minimum_skill,
            scholarship_available: self.scholarship_available,
            bootcamp_id,
            user_id: owner_id,
        }
    }
}

/// Body of `PUT /courses/{id}`; absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    #[validate(length(min = 1, message = "Please add a course title"))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "Please add a description"))]
    pub description: Option<String>,

    #[validate(range(min = 1, message = "Please add number of weeks"))]
    pub weeks: Option<i32>,

    #[validate(range(min = 0.0, message = "Please add a tuition cost"))]
    pub tuition: Option<f64>,

    pub minimum_skill: Option<MinimumSkill>,

    pub scholarship_available: Option<bool>,
}

impl From<UpdateCourseRequest> for UpdateCourse {
    fn from(req: UpdateCourseRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            weeks: req.weeks,
            tuition: req.tuition,
            minimum_skill: req.minimum_skill,
            scholarship_available: req.scholarship_available,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_course_request() {
        let req: CreateCourseRequest = serde_json::from_value(json!({
            "title": "Front End Web Development",
            "description": "HTML, CSS and JavaScript",
            "weeks": 8,
            "tuition": 8000,
            "minimumSkill": "beginner"
        }))
        .unwrap();

        assert!(req.validate().is_ok());
        let new = req.into_new(3, 4);
        assert_eq!(new.minimum_skill, MinimumSkill::Beginner);
        assert_eq!((new.bootcamp_id, new.user_id), (3, 4));
        assert!(!new.scholarship_available);
    }

    #[test]
    fn test_rejects_zero_weeks_and_negative_tuition() {
        let req: CreateCourseRequest = serde_json::from_value(json!({
            "title": "t",
            "description": "d",
            "weeks": 0,
            "tuition": -1,
            "minimumSkill": "advanced"
        }))
        .unwrap();

        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("weeks"));
        assert!(errors.field_errors().contains_key("tuition"));
    }

    #[test]
    fn test_unknown_skill_fails_to_deserialize() {
        let result = serde_json::from_value::<UpdateCourseRequest>(json!({"minimumSkill": "expert"}));
        assert!(result.is_err());
    }
}
