//! Lessons belonging to a course, ordered by position.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned by [`Lesson::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LessonValidationError {
    /// Title is empty after trimming.
    #[error("lesson title must not be empty")]
    EmptyTitle,
    /// Position index is negative.
    #[error("lesson position must not be negative")]
    NegativePosition,
    /// Duration is negative.
    #[error("lesson duration must not be negative")]
    NegativeDuration,
    /// Kind string is not video/text/quiz.
    #[error("unknown lesson kind: {0}")]
    UnknownKind(String),
}

/// Content type of a lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LessonKind {
    /// Streamed video; `duration_seconds` is the runtime.
    Video,
    /// Written material.
    Text,
    /// Inline knowledge check.
    Quiz,
}

impl LessonKind {
    /// Stable string form used in the database and over the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Text => "text",
            Self::Quiz => "quiz",
        }
    }
}

impl fmt::Display for LessonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LessonKind {
    type Err = LessonValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "video" => Ok(Self::Video),
            "text" => Ok(Self::Text),
            "quiz" => Ok(Self::Quiz),
            other => Err(LessonValidationError::UnknownKind(other.to_owned())),
        }
    }
}

/// Unvalidated lesson fields.
#[derive(Debug, Clone)]
pub struct LessonDraft {
    /// Lesson identifier.
    pub id: Uuid,
    /// Owning course.
    pub course_id: Uuid,
    /// Ordering index within the course, starting at 0.
    pub position: i32,
    /// Lesson title.
    pub title: String,
    /// Content type.
    pub kind: LessonKind,
    /// Expected time to complete, in seconds.
    pub duration_seconds: i32,
}

/// A single lesson within a course.
#[derive(Debug, Clone, PartialEq)]
pub struct Lesson {
    id: Uuid,
    course_id: Uuid,
    position: i32,
    title: String,
    kind: LessonKind,
    duration_seconds: i32,
}

impl Lesson {
    /// Validate a draft into a lesson.
    pub fn new(draft: LessonDraft) -> Result<Self, LessonValidationError> {
        let LessonDraft {
            id,
            course_id,
            position,
            title,
            kind,
            duration_seconds,
        } = draft;

        if title.trim().is_empty() {
            return Err(LessonValidationError::EmptyTitle);
        }
        if position < 0 {
            return Err(LessonValidationError::NegativePosition);
        }
        if duration_seconds < 0 {
            return Err(LessonValidationError::NegativeDuration);
        }

        Ok(Self {
            id,
            course_id,
            position,
            title,
            kind,
            duration_seconds,
        })
    }

    /// Lesson identifier.
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Owning course.
    pub const fn course_id(&self) -> Uuid {
        self.course_id
    }

    /// Ordering index within the course.
    pub const fn position(&self) -> i32 {
        self.position
    }

    /// Lesson title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Content type.
    pub const fn kind(&self) -> LessonKind {
        self.kind
    }

    /// Expected time to complete, in seconds.
    pub const fn duration_seconds(&self) -> i32 {
        self.duration_seconds
    }
}
