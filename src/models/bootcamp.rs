use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Career {
    #[serde(rename = "Web Development")]
    WebDevelopment,
    #[serde(rename = "Mobile Development")]
    MobileDevelopment,
    #[serde(rename = "UI/UX")]
    UiUx,
    #[serde(rename = "Data Science")]
    DataScience,
    #[serde(rename = "Business")]
    Business,
    #[serde(rename = "Other")]
    Other,
}

/// Geocoded point stored on the record. `coordinates` is `[lng, lat]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub coordinates: [f64; 2],
    pub formatted_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zipcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bootcamp {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub location: Option<Location>,
    pub careers: Vec<Career>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_cost: Option<f64>,
    #[serde(default = "default_photo")]
    pub photo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    #[serde(default)]
    pub housing: bool,
    #[serde(default)]
    pub job_assistance: bool,
    #[serde(default)]
    pub job_guarantee: bool,
    #[serde(default)]
    pub accept_gi: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Uuid>,
}

fn default_photo() -> String {
    "no-photo.jpg".to_string()
}

/// The two media fields a bootcamp record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Photo,
    Video,
}

impl MediaKind {
    /// Filename prefix, also the record field that stores the filename.
    pub fn prefix(&self) -> &'static str {
        match self {
            MediaKind::Photo => "photo",
            MediaKind::Video => "video",
        }
    }

    /// Expected MIME top-level type.
    pub fn mime_class(&self) -> &'static str {
        match self {
            MediaKind::Photo => "image",
            MediaKind::Video => "video",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateBootcamp {
    pub name: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub careers: Option<Vec<Career>>,
    pub average_cost: Option<f64>,
    #[serde(default)]
    pub housing: bool,
    #[serde(default)]
    pub job_assistance: bool,
    #[serde(default)]
    pub job_guarantee: bool,
    #[serde(default)]
    pub accept_gi: bool,
    pub user: Option<Uuid>,
}

impl CreateBootcamp {
    /// Collects every field complaint so the response can report them all at
    /// once.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();

        match &self.name {
            None => problems.push("Please add a name".to_string()),
            Some(name) if name.trim().is_empty() => {
                problems.push("Please add a name".to_string())
            }
            Some(name) if name.chars().count() > 50 => {
                problems.push("Name can not be more than 50 characters".to_string())
            }
            _ => {}
        }

        match &self.description {
            None => problems.push("Please add a description".to_string()),
            Some(desc) if desc.trim().is_empty() => {
                problems.push("Please add a description".to_string())
            }
            Some(desc) if desc.chars().count() > 500 => {
                problems.push("Description can not be more than 500 characters".to_string())
            }
            _ => {}
        }

        if self.careers.as_ref().is_none_or(|c| c.is_empty()) {
            problems.push("Please add at least one career".to_string());
        }

        if let Some(phone) = &self.phone {
            if phone.chars().count() > 20 {
                problems.push("Phone number can not be longer than 20 characters".to_string());
            }
        }

        if let Some(email) = &self.email {
            if !email.contains('@') {
                problems.push("Please add a valid email".to_string());
            }
        }

        if let Some(website) = &self.website {
            if !website.starts_with("http://") && !website.starts_with("https://") {
                problems.push("Please use a valid URL with HTTP or HTTPS".to_string());
            }
        }

        if problems.is_empty() { Ok(()) } else { Err(problems) }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateBootcamp {
    pub name: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub careers: Option<Vec<Career>>,
    pub average_cost: Option<f64>,
    pub housing: Option<bool>,
    pub job_assistance: Option<bool>,
    pub job_guarantee: Option<bool>,
    pub accept_gi: Option<bool>,
}

impl UpdateBootcamp {
    /// Changed fields obey the same rules as on create.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();

        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                problems.push("Please add a name".to_string());
            } else if name.chars().count() > 50 {
                problems.push("Name can not be more than 50 characters".to_string());
            }
        }

        if let Some(desc) = &self.description {
            if desc.trim().is_empty() {
                problems.push("Please add a description".to_string());
            } else if desc.chars().count() > 500 {
                problems.push("Description can not be more than 500 characters".to_string());
            }
        }

        if let Some(careers) = &self.careers {
            if careers.is_empty() {
                problems.push("Please add at least one career".to_string());
            }
        }

        if let Some(phone) = &self.phone {
            if phone.chars().count() > 20 {
                problems.push("Phone number can not be longer than 20 characters".to_string());
            }
        }

        if let Some(email) = &self.email {
            if !email.contains('@') {
                problems.push("Please add a valid email".to_string());
            }
        }

        if let Some(website) = &self.website {
            if !website.starts_with("http://") && !website.starts_with("https://") {
                problems.push("Please use a valid URL with HTTP or HTTPS".to_string());
            }
        }

        if problems.is_empty() { Ok(()) } else { Err(problems) }
    }
}

/// Derives the url slug from a bootcamp name. Lowercase alphanumerics with
/// single dashes, no leading/trailing dash.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_payload() -> CreateBootcamp {
        CreateBootcamp {
            name: Some("Devworks Bootcamp".to_string()),
            description: Some("Full stack web development".to_string()),
            website: Some("https://devworks.com".to_string()),
            phone: Some("(111) 111-1111".to_string()),
            email: Some("enroll@devworks.com".to_string()),
            address: Some("233 Bay State Rd Boston MA 02215".to_string()),
            careers: Some(vec![Career::WebDevelopment, Career::UiUx]),
            average_cost: Some(10000.0),
            housing: true,
            job_assistance: true,
            job_guarantee: false,
            accept_gi: true,
            user: None,
        }
    }

    #[test]
    fn valid_payload_passes() {
        assert!(valid_payload().validate().is_ok());
    }

    #[test]
    fn missing_required_fields_are_all_reported() {
        let mut payload = valid_payload();
        payload.name = None;
        payload.description = None;

        let problems = payload.validate().unwrap_err();
        assert_eq!(problems.len(), 2);
        assert!(problems.contains(&"Please add a name".to_string()));
        assert!(problems.contains(&"Please add a description".to_string()));
    }

    #[test]
    fn overlong_name_is_rejected() {
        let mut payload = valid_payload();
        payload.name = Some("x".repeat(51));
        let problems = payload.validate().unwrap_err();
        assert!(problems[0].contains("50 characters"));
    }

    #[test]
    fn empty_careers_is_rejected() {
        let mut payload = valid_payload();
        payload.careers = Some(vec![]);
        let problems = payload.validate().unwrap_err();
        assert!(problems.contains(&"Please add at least one career".to_string()));
    }

    #[test]
    fn bad_email_and_website_are_rejected() {
        let mut payload = valid_payload();
        payload.email = Some("not-an-email".to_string());
        payload.website = Some("devworks.com".to_string());
        let problems = payload.validate().unwrap_err();
        assert_eq!(problems.len(), 2);
    }

    #[test]
    fn update_payload_enforces_create_rules_on_changed_fields() {
        let payload = UpdateBootcamp {
            name: Some("x".repeat(60)),
            description: Some("y".repeat(600)),
            website: Some("devworks.com".to_string()),
            phone: None,
            email: Some("not-an-email".to_string()),
            address: None,
            careers: Some(vec![]),
            average_cost: None,
            housing: None,
            job_assistance: None,
            job_guarantee: None,
            accept_gi: None,
        };

        let problems = payload.validate().unwrap_err();
        assert_eq!(problems.len(), 5);
        assert!(problems.iter().any(|p| p.contains("50 characters")));
        assert!(problems.iter().any(|p| p.contains("500 characters")));
        assert!(problems.contains(&"Please add at least one career".to_string()));
        assert!(problems.contains(&"Please add a valid email".to_string()));
        assert!(problems.iter().any(|p| p.contains("HTTP or HTTPS")));
    }

    #[test]
    fn update_payload_with_untouched_fields_passes() {
        let payload = UpdateBootcamp {
            name: None,
            description: None,
            website: None,
            phone: None,
            email: None,
            address: None,
            careers: None,
            average_cost: Some(11000.0),
            housing: Some(true),
            job_assistance: None,
            job_guarantee: None,
            accept_gi: None,
        };
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn slugify_derives_stable_url_slug() {
        assert_eq!(slugify("Devworks Bootcamp"), "devworks-bootcamp");
        assert_eq!(slugify("  ModernTech  Bootcamp! "), "moderntech-bootcamp");
        assert_eq!(slugify("UI/UX & Design"), "ui-ux-design");
    }

    #[test]
    fn career_serde_uses_display_names() {
        let json = serde_json::to_string(&Career::WebDevelopment).unwrap();
        assert_eq!(json, "\"Web Development\"");
        let back: Career = serde_json::from_str("\"UI/UX\"").unwrap();
        assert_eq!(back, Career::UiUx);
    }
}
