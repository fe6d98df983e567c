use serde::{Deserialize, Serialize};
use tokio_postgres::Row;
use utoipa::ToSchema;

use crate::utils::error::{ApiError, Result};

pub const TITLE_MAX_LEN: usize = 100;
pub const CREATOR_MAX_LEN: usize = 50;

/// A row of the `projects` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Project {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub creator: String,
}

impl Project {
    pub fn from_row(row: &Row) -> Self {
        Self {
            id: row.get("id"),
            title: row.get("title"),
            description: row.get("description"),
            creator: row.get("creator"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NewProject {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub creator: String,
}

impl NewProject {
    pub fn new(title: impl Into<String>, description: Option<&str>, creator: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.map(str::to_owned),
            creator: creator.into(),
        }
    }

    /// Trims every field and checks them against the column limits.
    pub fn validated(self) -> Result<Self> {
        let title = required("title", &self.title, TITLE_MAX_LEN)?;
        let creator = required("creator", &self.creator, CREATOR_MAX_LEN)?;
        let description = self
            .description
            .map(|d| d.trim().to_owned())
            .filter(|d| !d.is_empty());

        if description.as_deref().is_some_and(has_nul) {
            return Err(nul_error("description"));
        }

        Ok(Self {
            title,
            description,
            creator,
        })
    }
}

fn required(field: &str, value: &str, max_len: usize) -> Result<String> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(ApiError::validation(field, format!("{field} must not be empty")));
    }

    if has_nul(trimmed) {
        return Err(nul_error(field));
    }

    if trimmed.chars().count() > max_len {
        return Err(ApiError::validation(
            field,
            format!("{field} must be at most {max_len} characters"),
        ));
    }

    Ok(trimmed.to_owned())
}

// Postgres text columns cannot store NUL even though JSON can carry it.
fn has_nul(value: &str) -> bool {
    value.contains('\0')
}

fn nul_error(field: &str) -> ApiError {
    ApiError::validation(field, format!("{field} must not contain NUL characters"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validated_trims_fields() {
        let project = NewProject::new("  Lasergravur-Projekt ", Some("  Holzschild  "), " anna ")
            .validated()
            .unwrap();

        assert_eq!(project.title, "Lasergravur-Projekt");
        assert_eq!(project.description.as_deref(), Some("Holzschild"));
        assert_eq!(project.creator, "anna");
    }

    #[test]
    fn blank_description_becomes_none() {
        let project = NewProject::new("Halsband", Some("   "), "ben").validated().unwrap();
        assert_eq!(project.description, None);
    }

    #[test]
    fn blank_title_is_rejected() {
        let err = NewProject::new(" ", None, "ben").validated().unwrap_err();
        assert!(matches!(err, ApiError::Validation { ref field, .. } if field == "title"));
    }

    #[test]
    fn nul_characters_are_rejected() {
        let err = NewProject::new("a\u{0}b", None, "anna").validated().unwrap_err();
        assert!(matches!(err, ApiError::Validation { ref field, .. } if field == "title"));

        let err = NewProject::new("Halsband", None, "an\u{0}na").validated().unwrap_err();
        assert!(matches!(err, ApiError::Validation { ref field, .. } if field == "creator"));

        let err = NewProject::new("Halsband", Some("Leder\u{0}"), "anna")
            .validated()
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation { ref field, .. } if field == "description"));
    }

    #[test]
    fn blank_creator_is_rejected() {
        let err = NewProject::new("Halsband", None, "").validated().unwrap_err();
        assert!(matches!(err, ApiError::Validation { ref field, .. } if field == "creator"));
    }

    #[test]
    fn length_limits_count_characters() {
        let umlauts = "ä".repeat(TITLE_MAX_LEN);
        assert!(NewProject::new(umlauts.clone(), None, "ben").validated().is_ok());

        let too_long = format!("{umlauts}x");
        let err = NewProject::new(too_long, None, "ben").validated().unwrap_err();
        assert!(matches!(err, ApiError::Validation { ref field, .. } if field == "title"));

        let creator = "c".repeat(CREATOR_MAX_LEN + 1);
        let err = NewProject::new("Halsband", None, creator).validated().unwrap_err();
        assert!(matches!(err, ApiError::Validation { ref field, .. } if field == "creator"));
    }

    #[test]
    fn missing_description_deserializes_as_none() {
        let project: NewProject =
            serde_json::from_str(r#"{"title": "Halsband", "creator": "ben"}"#).unwrap();
        assert_eq!(project.description, None);
    }
}
