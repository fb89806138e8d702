//! Course catalogue data model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::profile::UserId;
use super::subscription::SubscriptionTier;

/// Maximum allowed length for a course title.
pub const COURSE_TITLE_MAX: usize = 200;

/// Validation errors returned by [`Course::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CourseValidationError {
    /// Title is empty after trimming.
    #[error("course title must not be empty")]
    EmptyTitle,
    /// Title exceeds [`COURSE_TITLE_MAX`] characters.
    #[error("course title must be at most {COURSE_TITLE_MAX} characters")]
    TitleTooLong,
    /// Category is empty after trimming.
    #[error("course category must not be empty")]
    EmptyCategory,
    /// Level string is not beginner/intermediate/advanced.
    #[error("unknown course level: {0}")]
    UnknownLevel(String),
}

/// Difficulty level shown in the catalogue and usable as a listing filter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum CourseLevel {
    /// No prior knowledge assumed.
    Beginner,
    /// Builds on beginner material.
    Intermediate,
    /// Assumes solid working knowledge.
    Advanced,
}

impl CourseLevel {
    /// Stable string form used in the database and over the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for CourseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CourseLevel {
    type Err = CourseValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(CourseValidationError::UnknownLevel(other.to_owned())),
        }
    }
}

/// Unvalidated course fields, as received from an adapter.
#[derive(Debug, Clone)]
pub struct CourseDraft {
    /// Course identifier.
    pub id: Uuid,
    /// Owning instructor.
    pub instructor_id: UserId,
    /// Catalogue title.
    pub title: String,
    /// Long-form description.
    pub description: String,
    /// Difficulty level.
    pub level: CourseLevel,
    /// Free-form catalogue category (e.g. "programming").
    pub category: String,
    /// Subscription tier required to enroll.
    pub tier: SubscriptionTier,
    /// Whether students can see and enroll in the course.
    pub published: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A course owned by an instructor.
///
/// ## Invariants
/// - `title` is non-empty and at most [`COURSE_TITLE_MAX`] characters.
/// - `category` is non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    id: Uuid,
    instructor_id: UserId,
    title: String,
    description: String,
    level: CourseLevel,
    category: String,
    tier: SubscriptionTier,
    published: bool,
    created_at: DateTime<Utc>,
}

impl Course {
    /// Validate a draft into a course.
    pub fn new(draft: CourseDraft) -> Result<Self, CourseValidationError> {
        let CourseDraft {
            id,
            instructor_id,
            title,
            description,
            level,
            category,
            tier,
            published,
            created_at,
        } = draft;

        if title.trim().is_empty() {
            return Err(CourseValidationError::EmptyTitle);
        }
        if title.chars().count() > COURSE_TITLE_MAX {
            return Err(CourseValidationError::TitleTooLong);
        }
        if category.trim().is_empty() {
            return Err(CourseValidationError::EmptyCategory);
        }

        Ok(Self {
            id,
            instructor_id,
            title,
            description,
            level,
            category,
            tier,
            published,
            created_at,
        })
    }

    /// Course identifier.
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Owning instructor.
    pub const fn instructor_id(&self) -> UserId {
        self.instructor_id
    }

    /// Catalogue title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Long-form description.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Difficulty level.
    pub const fn level(&self) -> CourseLevel {
        self.level
    }

    /// Catalogue category.
    pub fn category(&self) -> &str {
        self.category.as_str()
    }

    /// Subscription tier required to enroll.
    pub const fn tier(&self) -> SubscriptionTier {
        self.tier
    }

    /// Whether students can see and enroll in the course.
    pub const fn is_published(&self) -> bool {
        self.published
    }

    /// Creation timestamp.
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether `caller` may view this course even when unpublished.
    pub fn is_visible_to_owner_or_admin(&self, caller: UserId, is_admin: bool) -> bool {
        self.published || is_admin || self.instructor_id == caller
    }
}

/// Optional filters for the published-course listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFilter {
    /// Restrict to one catalogue category.
    pub category: Option<String>,
    /// Restrict to one difficulty level.
    pub level: Option<CourseLevel>,
}
