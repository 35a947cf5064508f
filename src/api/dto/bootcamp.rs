//! Request bodies for bootcamp endpoints.

use regex::Regex;
use serde::Deserialize;
use serde_with::serde_as;
use std::borrow::Cow;
use std::sync::LazyLock;
use validator::{Validate, ValidationError};

use crate::domain::entities::bootcamp::CAREERS;
use crate::domain::entities::{NewBootcamp, UpdateBootcamp};

/// Digits, spaces and the usual phone punctuation.
static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\+?[0-9 ().-]+$").unwrap());

/// Body of `POST /bootcamps`. The owner is always the caller.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBootcampRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 50, message = "Please add a name of at most 50 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 500,
        message = "Please add a description of at most 500 characters"
    ))]
    pub description: String,

    #[validate(url(message = "Please use a valid URL with HTTP or HTTPS"))]
    pub website: Option<String>,

    #[validate(
        length(max = 20, message = "Phone number can not be longer than 20 characters"),
        regex(path = "*PHONE_REGEX", message = "Please add a valid phone number")
    )]
    pub phone: Option<String>,

    #[validate(email(message = "Please add a valid email"))]
    pub email: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, message = "Please add an address"))]
    pub address: String,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180"))]
    pub longitude: Option<f64>,

    #[serde(default)]
    #[validate(custom(function = "validate_careers"))]
    pub careers: Vec<String>,

    #[serde(default)]
    pub housing: bool,

    #[serde(default)]
    pub job_assistance: bool,

    #[serde(default)]
    pub job_guarantee: bool,

    #[serde(default)]
    pub accept_gi: bool,
}

impl CreateBootcampRequest {
    pub fn into_new(self, owner_id: i64) -> NewBootcamp {
        NewBootcamp {
            name: self.name.trim().to_string(),
            description: self.description,
            website: self.website,
            phone: self.phone,
            email: self.email,
            address: self.address,
            latitude: self.latitude,
            longitude: self.longitude,
            careers: self.careers,
            housing: self.housing,
            job_assistance: self.job_assistance,
            job_guarantee: self.job_guarantee,
            accept_gi: self.accept_gi,
            user_id: owner_id,
        }
    }
}

/// Body of `PUT /bootcamps/{id}`.
///
/// Absent fields are left unchanged; `null` clears the optional contact and
/// location fields.
#[serde_as]
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBootcampRequest {
    #[validate(length(min = 1, max = 50, message = "Please add a name of at most 50 characters"))]
    pub name: Option<String>,

    #[validate(length(
        min = 1,
        max = 500,
        message = "Please add a description of at most 500 characters"
    ))]
    pub description: Option<String>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    #[validate(url(message = "Please use a valid URL with HTTP or HTTPS"))]
    pub website: Option<Option<String>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    #[validate(
        length(max = 20, message = "Phone number can not be longer than 20 characters"),
        regex(path = "*PHONE_REGEX", message = "Please add a valid phone number")
    )]
    pub phone: Option<Option<String>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    #[validate(email(message = "Please add a valid email"))]
    pub email: Option<Option<String>>,

    #[validate(length(min = 1, message = "Please add an address"))]
    pub address: Option<String>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: Option<Option<f64>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180"))]
    pub longitude: Option<Option<f64>>,

    #[validate(custom(function = "validate_careers"))]
    pub careers: Option<Vec<String>>,

    pub housing: Option<bool>,
    pub job_assistance: Option<bool>,
    pub job_guarantee: Option<bool>,
    pub accept_gi: Option<bool>,
}

impl From<UpdateBootcampRequest> for UpdateBootcamp {
    fn from(req: UpdateBootcampRequest) -> Self {
        Self {
            name: req.name.map(|n| n.trim().to_string()),
            description: req.description,
            website: req.website,
            phone: req.phone,
            email: req.email,
            address: req.address,
            latitude: req.latitude,
            longitude: req.longitude,
            careers: req.careers,
            housing: req.housing,
            job_assistance: req.job_assistance,
            job_guarantee: req.job_guarantee,
            accept_gi: req.accept_gi,
        }
    }
}

/// At least one career, each from the fixed list.
fn validate_careers(careers: &[String]) -> Result<(), ValidationError> {
    if careers.is_empty() {
        return Err(ValidationError::new("careers")
            .with_message(Cow::Borrowed("Please add at least one career")));
    }

    if let Some(unknown) = careers.iter().find(|c| !CAREERS.contains(&c.as_str())) {
        return Err(ValidationError::new("careers")
            .with_message(Cow::Owned(format!("'{unknown}' is not a supported career"))));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create(body: serde_json::Value) -> CreateBootcampRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_valid_create_request() {
        let req = create(json!({
            "name": "Devworks Bootcamp",
            "description": "Full stack web development",
            "website": "https://devworks.com",
            "email": "enroll@devworks.com",
            "address": "233 Bay State Rd Boston MA 02215",
            "careers": ["Web Development", "UI/UX"],
            "jobAssistance": true
        }));

        assert!(req.validate().is_ok());
        let new = req.into_new(9);
        assert_eq!(new.user_id, 9);
        assert!(new.job_assistance);
        assert!(!new.housing);
    }

    #[test]
    fn test_missing_name_and_bad_career() {
        let req = create(json!({
            "description": "d",
            "address": "a",
            "careers": ["Knitting"]
        }));

        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("careers"));
    }

    #[test]
    fn test_phone_format() {
        let mut body = json!({
            "name": "n",
            "description": "d",
            "address": "a",
            "careers": ["Other"],
            "phone": "(111) 111-1111"
        });
        assert!(create(body.clone()).validate().is_ok());

        body["phone"] = json!("call me");
        let errors = create(body).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("phone"));
    }

    #[test]
    fn test_empty_careers_rejected() {
        let req = create(json!({"name": "n", "description": "d", "address": "a"}));
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_distinguishes_null_from_absent() {
        let req: UpdateBootcampRequest =
            serde_json::from_value(json!({"phone": null, "housing": true})).unwrap();
        assert!(req.validate().is_ok());

        let update = UpdateBootcamp::from(req);
        assert_eq!(update.phone, Some(None));
        assert_eq!(update.website, None);
        assert_eq!(update.housing, Some(true));
    }

    #[test]
    fn test_update_rejects_invalid_website() {
        let req: UpdateBootcampRequest =
            serde_json::from_value(json!({"website": "not a url"})).unwrap();
        assert!(req.validate().is_err());
    }
}
