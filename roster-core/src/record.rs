//! Student record model
//!
//! Every field is kept as text, including `age`, which is never parsed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Sentinel course option that disables course filtering
pub const ALL_COURSES: &str = "All";

/// One student's stored data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Identifier, meant to be unique but never checked
    pub id: String,
    /// Display name
    pub name: String,
    /// Age as entered
    pub age: String,
    /// Course name
    pub course: String,
}

impl StudentRecord {
    /// Create a new record
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        age: impl Into<String>,
        course: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age: age.into(),
            course: course.into(),
        }
    }

    /// Fail with the first empty field, in id, name, age, course order
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("id", &self.id),
            ("name", &self.name),
            ("age", &self.age),
            ("course", &self.course),
        ];
        match fields.into_iter().find(|(_, value)| value.is_empty()) {
            Some((field, _)) => Err(Error::validation(field)),
            None => Ok(()),
        }
    }

    /// Case-insensitive substring match against name or id.
    /// `needle` must already be lowercase.
    pub(crate) fn matches_search(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.id.to_lowercase().contains(needle)
    }

    /// Overwrite the fields present in `update`
    pub(crate) fn apply(&mut self, update: RecordUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(age) = update.age {
            self.age = age;
        }
        if let Some(course) = update.course {
            self.course = course;
        }
    }
}

/// Field changes for an update; `None` leaves the field as is
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordUpdate {
    /// New name
    pub name: Option<String>,
    /// New age
    pub age: Option<String>,
    /// New course
    pub course: Option<String>,
}

impl RecordUpdate {
    /// Update that overwrites every editable field
    pub fn all(
        name: impl Into<String>,
        age: impl Into<String>,
        course: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            age: Some(age.into()),
            course: Some(course.into()),
        }
    }

    /// Set the name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the age
    pub fn age(mut self, age: impl Into<String>) -> Self {
        self.age = Some(age.into());
        self
    }

    /// Set the course
    pub fn course(mut self, course: impl Into<String>) -> Self {
        self.course = Some(course.into());
        self
    }

    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.course.is_none()
    }
}

/// Course selector for [`RecordStore::filter`](crate::store::RecordStore::filter)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CourseFilter {
    /// Every course
    #[default]
    All,
    /// Exact, case-sensitive course name
    Exact(String),
}

impl CourseFilter {
    /// Whether `course` passes this filter
    pub fn accepts(&self, course: &str) -> bool {
        match self {
            Self::All => true,
            Self::Exact(wanted) => wanted == course,
        }
    }
}

impl From<&str> for CourseFilter {
    fn from(value: &str) -> Self {
        if value == ALL_COURSES {
            Self::All
        } else {
            Self::Exact(value.to_string())
        }
    }
}

impl From<String> for CourseFilter {
    fn from(value: String) -> Self {
        if value == ALL_COURSES {
            Self::All
        } else {
            Self::Exact(value)
        }
    }
}

impl FromStr for CourseFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for CourseFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_COURSES),
            Self::Exact(course) => f.write_str(course),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_reports_first_empty_field() {
        assert!(StudentRecord::new("1", "Amy", "20", "Math").validate().is_ok());

        let err = StudentRecord::new("1", "", "", "Math").validate().unwrap_err();
        assert!(matches!(err, Error::Validation { field: "name" }));

        let err = StudentRecord::new("", "Amy", "20", "").validate().unwrap_err();
        assert!(matches!(err, Error::Validation { field: "id" }));
    }

    #[test]
    fn test_apply_partial_update() {
        let mut record = StudentRecord::new("1", "Amy", "20", "Math");
        record.apply(RecordUpdate::default().course("CS"));
        assert_eq!(record, StudentRecord::new("1", "Amy", "20", "CS"));

        record.apply(RecordUpdate::all("Amelia", "21", "Physics"));
        assert_eq!(record, StudentRecord::new("1", "Amelia", "21", "Physics"));
    }

    #[test]
    fn test_course_filter_parsing() {
        assert_eq!(CourseFilter::from("All"), CourseFilter::All);
        assert_eq!(CourseFilter::from("all"), CourseFilter::Exact("all".into()));
        assert!(CourseFilter::All.accepts("Anything"));
        assert!(!CourseFilter::from("CS").accepts("cs"));
        assert_eq!(CourseFilter::from("CS").to_string(), "CS");
    }
}
