//! Request bodies for review endpoints.

use serde::Deserialize;
use validator::Validate;

use crate::domain::entities::{NewReview, UpdateReview};

/// Body of `POST /bootcamps/{id}/reviews`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateReviewRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Please add a title of at most 100 characters"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Please add some text"))]
    pub text: String,

    #[validate(range(
        min = 1,
        max = 10,
        message = "Please add a rating between 1 and 10"
    ))]
    pub rating: i32,
}

impl CreateReviewRequest {
    pub fn into_new(self, bootcamp_id: i64, author_id: i64) -> NewReview {
        NewReview {
            title: self.title,
            text: self.text,
            rating: self.rating,
            bootcamp_id,
            user_id: author_id,
        }
    }
}

/// Body of `PUT /reviews/{id}`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateReviewRequest {
    #[validate(length(min = 1, max = 100, message = "Please add a title of at most 100 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "Please add some text"))]
    pub text: Option<String>,

    #[validate(range(
        min = 1,
        max = 10,
        message = "Please add a rating between 1 and 10"
    ))]
    pub rating: Option<i32>,
}

impl From<UpdateReviewRequest> for UpdateReview {
    fn from(req: UpdateReviewRequest) -> Self {
        Self {
            title: req.title,
            text: req.text,
            rating: req.rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rating_bounds() {
        for (rating, ok) in [(0, false), (1, true), (10, true), (11, false)] {
            let req: CreateReviewRequest = serde_json::from_value(json!({
                "title": "Great",
                "text": "Learned a lot",
                "rating": rating
            }))
            .unwrap();
            assert_eq!(req.validate().is_ok(), ok, "rating {rating}");
        }
    }

    #[test]
    fn test_update_title_too_long() {
        let req = UpdateReviewRequest {
            title: Some("x".repeat(101)),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }
}
