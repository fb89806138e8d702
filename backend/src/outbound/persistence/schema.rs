//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. Diesel uses
//! them for compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// Registered accounts with credentials and role.
    ///
    /// `email` carries a unique index; role is one of
    /// `student`, `instructor`, `admin`.
    profiles (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login email, stored lowercase.
        email -> Varchar,
        /// Human-readable display name.
        display_name -> Varchar,
        /// Role string.
        role -> Varchar,
        /// Password hash in `salt:key` storage form.
        password_hash -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Subscription state mirrored from the payment processor.
    ///
    /// Keyed by user; absence of a row means the free tier.
    subscriptions (user_id) {
        /// Owning user, primary key.
        user_id -> Uuid,
        /// Tier string: `free`, `basic` or `premium`.
        tier -> Varchar,
        /// Billing status string: `active`, `past_due` or `canceled`.
        status -> Varchar,
        /// End of the current billing period, when the processor sent one.
        current_period_end -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Course catalogue.
    courses (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning instructor.
        instructor_id -> Uuid,
        /// Course title.
        title -> Varchar,
        /// Long-form description.
        description -> Text,
        /// Difficulty string: `beginner`, `intermediate` or `advanced`.
        level -> Varchar,
        /// Free-form category label.
        category -> Varchar,
        /// Minimum subscription tier required to enroll.
        tier -> Varchar,
        /// Whether the course appears in the public catalogue.
        published -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Lessons within a course, ordered by `position`.
    lessons (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning course.
        course_id -> Uuid,
        /// Ordering within the course, starting at 1.
        position -> Int4,
        /// Lesson title.
        title -> Varchar,
        /// Content kind string: `video`, `text` or `quiz`.
        kind -> Varchar,
        /// Nominal duration in seconds.
        duration_seconds -> Int4,
    }
}

diesel::table! {
    /// One row per (user, course) enrollment.
    enrollments (user_id, course_id) {
        /// Enrolled user.
        user_id -> Uuid,
        /// Target course.
        course_id -> Uuid,
        /// Rounded completion percentage, 0 to 100.
        progress_percent -> Int2,
        /// Enrollment timestamp.
        enrolled_at -> Timestamptz,
        /// Set once every lesson is complete.
        completed_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Per-lesson progress, one row per (user, lesson).
    lesson_progress (user_id, lesson_id) {
        /// Learning user.
        user_id -> Uuid,
        /// Target lesson.
        lesson_id -> Uuid,
        /// Owning course, denormalised for completion counts.
        course_id -> Uuid,
        /// Whether the lesson has ever been completed.
        completed -> Bool,
        /// Accumulated watch time in seconds.
        watch_time_seconds -> Int4,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Final exams, at most one per course.
    exams (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning course; carries a unique index.
        course_id -> Uuid,
        /// Exam title.
        title -> Varchar,
        /// Minimum percentage required to pass.
        passing_percent -> Int2,
        /// Question bank with correct answers, as a JSON array.
        questions -> Jsonb,
    }
}

diesel::table! {
    /// Graded exam attempts.
    exam_attempts (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Exam attempted.
        exam_id -> Uuid,
        /// Attempting user.
        user_id -> Uuid,
        /// Number of correct answers.
        score -> Int4,
        /// Rounded score percentage.
        percent -> Int2,
        /// Whether the attempt met the passing threshold.
        passed -> Bool,
        /// Submission timestamp.
        submitted_at -> Timestamptz,
    }
}

diesel::table! {
    /// Issued certificates.
    ///
    /// `(user_id, course_id)` and `certificate_number` both carry unique
    /// indexes.
    certificates (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Certificate holder.
        user_id -> Uuid,
        /// Completed course.
        course_id -> Uuid,
        /// Passing exam attempt, when the course had an exam.
        exam_attempt_id -> Nullable<Uuid>,
        /// Public verification number.
        certificate_number -> Varchar,
        /// Issue timestamp.
        issued_at -> Timestamptz,
    }
}

diesel::table! {
    /// In-app notifications and scheduled email reminders.
    notifications (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Recipient.
        user_id -> Uuid,
        /// Short headline.
        title -> Varchar,
        /// Message body.
        body -> Text,
        /// Whether the recipient has read it in the app.
        read -> Bool,
        /// Email dispatch time for reminders; null for in-app only rows.
        scheduled_for -> Nullable<Timestamptz>,
        /// Whether the reminder email has been dispatched.
        sent -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(lessons -> courses (course_id));
diesel::joinable!(enrollments -> courses (course_id));
diesel::joinable!(exam_attempts -> exams (exam_id));

diesel::allow_tables_to_appear_in_same_query!(
    profiles,
    subscriptions,
    courses,
    lessons,
    enrollments,
    lesson_progress,
    exams,
    exam_attempts,
    certificates,
    notifications,
);
