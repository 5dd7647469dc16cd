use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::{CourseId, CourseTemplate};

#[derive(Deserialize)]
struct CatalogDoc {
    courses: Vec<CourseTemplate>,
}

/// Read-only list of the courses a round can be played at.
#[derive(Debug, Clone, Default)]
pub struct CourseCatalog {
    courses: Vec<CourseTemplate>,
}

impl CourseCatalog {
    /// # Errors
    ///
    /// Returns `CoreError::Parse` if a course lists the same hole number twice.
    pub fn new(courses: Vec<CourseTemplate>) -> Result<Self, CoreError> {
        let courses: Vec<CourseTemplate> = courses
            .into_iter()
            .map(|c| CourseTemplate::new(c.id, c.name, c.address, c.yardages, c.par, c.holes))
            .collect();
        if let Some((course, hole)) = courses
            .iter()
            .find_map(|c| c.repeated_hole_number().map(|n| (c, n)))
        {
            return Err(CoreError::Parse(format!(
                "course {} ({}) lists hole {hole} more than once",
                course.id, course.name
            )));
        }
        Ok(Self { courses })
    }

    /// Parses a `{"courses": [...]}` document.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Parse` if the document is not a valid catalog or repeats a hole number.
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let doc: CatalogDoc = serde_json::from_str(json)?;
        Self::new(doc.courses)
    }

    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&json)?;
        debug!(path = %path.display(), courses = catalog.courses.len(), "loaded course catalog");
        Ok(catalog)
    }

    #[must_use]
    pub fn all_courses(&self) -> &[CourseTemplate] {
        &self.courses
    }

    #[must_use]
    pub fn course_by_id(&self, id: CourseId) -> Option<&CourseTemplate> {
        let course = self.courses.iter().find(|c| c.id == id);
        if course.is_none() {
            warn!(course_id = id, "course unavailable");
        }
        course
    }

    #[must_use]
    pub fn course_by_name(&self, name: &str) -> Option<&CourseTemplate> {
        self.courses.iter().find(|c| c.name == name)
    }

    /// Display name for a course id, "Course Unavailable" when it is not in the catalog.
    #[must_use]
    pub fn course_name(&self, id: CourseId) -> &str {
        self.course_by_id(id)
            .map_or("Course Unavailable", |c| c.name.as_str())
    }

    /// Case-insensitive substring match on name or address; every course for empty text.
    #[must_use]
    pub fn search_courses(&self, text: &str) -> Vec<&CourseTemplate> {
        if text.is_empty() {
            return self.courses.iter().collect();
        }
        let needle = text.to_lowercase();
        self.courses
            .iter()
            .filter(|c| {
                c.name.to_lowercase().contains(&needle) || c.address.to_lowercase().contains(&needle)
            })
            .collect()
    }
}
