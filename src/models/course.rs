use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MinimumSkill {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub weeks: u32,
    pub tuition: f64,
    pub minimum_skill: MinimumSkill,
    #[serde(default)]
    pub scholarship_available: bool,
    pub created_at: DateTime<Utc>,
    /// Owning bootcamp.
    pub bootcamp: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCourse {
    pub title: Option<String>,
    pub description: Option<String>,
    pub weeks: Option<u32>,
    pub tuition: Option<f64>,
    pub minimum_skill: Option<MinimumSkill>,
    #[serde(default)]
    pub scholarship_available: bool,
    pub user: Option<Uuid>,
}

impl CreateCourse {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();

        if self.title.as_ref().is_none_or(|t| t.trim().is_empty()) {
            problems.push("Please add a course title".to_string());
        }
        if self
            .description
            .as_ref()
            .is_none_or(|d| d.trim().is_empty())
        {
            problems.push("Please add a description".to_string());
        }
        if self.weeks.is_none() {
            problems.push("Please add number of weeks".to_string());
        }
        if self.tuition.is_none() {
            problems.push("Please add a tuition cost".to_string());
        }
        if self.minimum_skill.is_none() {
            problems.push("Please add a minimum skill".to_string());
        }

        if problems.is_empty() { Ok(()) } else { Err(problems) }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateCourse {
    pub title: Option<String>,
    pub description: Option<String>,
    pub weeks: Option<u32>,
    pub tuition: Option<f64>,
    pub minimum_skill: Option<MinimumSkill>,
    pub scholarship_available: Option<bool>,
}

impl UpdateCourse {
    /// Changed fields obey the same rules as on create.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();

        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                problems.push("Please add a course title".to_string());
            }
        }

        if let Some(description) = &self.description {
            if description.trim().is_empty() {
                problems.push("Please add a description".to_string());
            }
        }

        if problems.is_empty() { Ok(()) } else { Err(problems) }
    }
}
