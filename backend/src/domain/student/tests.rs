//! Tests for student field validation and record construction.

use super::*;
use chrono::{Duration, TimeZone};
use rstest::{fixture, rstest};

#[fixture]
fn draft() -> StudentDraft {
    StudentDraft::try_from_strings(
        "Ada Lovelace",
        "ada@example.com",
        "Mathematics",
        Some("https://img.example/ada.png".to_owned()),
    )
    .expect("fixture draft is valid")
}

#[fixture]
fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0)
        .single()
        .expect("fixture timestamp")
}

#[rstest]
#[case("", StudentValidationError::EmptyName)]
#[case("   ", StudentValidationError::EmptyName)]
#[case("A", StudentValidationError::NameTooShort { min: NAME_MIN })]
fn name_rejects_invalid_input(#[case] input: &str, #[case] expected: StudentValidationError) {
    assert_eq!(StudentName::new(input), Err(expected));
}

#[rstest]
fn name_enforces_upper_bound() {
    assert!(StudentName::new("a".repeat(NAME_MAX)).is_ok());
    assert_eq!(
        StudentName::new("a".repeat(NAME_MAX + 1)),
        Err(StudentValidationError::NameTooLong { max: NAME_MAX })
    );
}

#[rstest]
fn name_counts_characters_not_bytes() {
    assert!(StudentName::new("Åå").is_ok());
}

#[rstest]
#[case("ada@example.com")]
#[case("a@b")]
#[case("first.last+tag@sub.example.org")]
fn email_accepts_valid_addresses(#[case] input: &str) {
    assert!(Email::new(input).is_ok());
}

#[rstest]
#[case("", StudentValidationError::EmptyEmail)]
#[case("ada.example.com", StudentValidationError::InvalidEmail)]
#[case("ada@", StudentValidationError::InvalidEmail)]
#[case("@example.com", StudentValidationError::InvalidEmail)]
#[case("ada @example.com", StudentValidationError::InvalidEmail)]
fn email_rejects_invalid_addresses(#[case] input: &str, #[case] expected: StudentValidationError) {
    assert_eq!(Email::new(input), Err(expected));
}

#[rstest]
#[case("", StudentValidationError::EmptyCourse)]
#[case("M", StudentValidationError::CourseTooShort { min: COURSE_MIN })]
fn course_rejects_invalid_input(#[case] input: &str, #[case] expected: StudentValidationError) {
    assert_eq!(Course::new(input), Err(expected));
}

#[rstest]
fn course_enforces_upper_bound() {
    assert!(Course::new("c".repeat(COURSE_MAX)).is_ok());
    assert_eq!(
        Course::new("c".repeat(COURSE_MAX + 1)),
        Err(StudentValidationError::CourseTooLong { max: COURSE_MAX })
    );
}

#[rstest]
fn blank_profile_image_url_is_absent() {
    assert!(ProfileImageUrl::new("  ").is_none());
    assert!(ProfileImageUrl::new("https://img.example/a.png").is_some());
}

#[rstest]
#[case(StudentValidationError::InvalidId, "id")]
#[case(StudentValidationError::NameTooLong { max: NAME_MAX }, "name")]
#[case(StudentValidationError::InvalidEmail, "email")]
#[case(StudentValidationError::EmptyCourse, "course")]
fn validation_errors_name_their_field(
    #[case] error: StudentValidationError,
    #[case] expected: &str,
) {
    assert_eq!(error.field(), expected);
}

#[rstest]
fn student_id_round_trips_through_text() {
    let id = StudentId::random();
    let parsed: StudentId = id.to_string().parse().expect("valid id");
    assert_eq!(parsed, id);
}

#[rstest]
#[case("not-a-uuid")]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6")]
fn student_id_rejects_malformed_input(#[case] input: &str) {
    assert_eq!(StudentId::new(input), Err(StudentValidationError::InvalidId));
}

#[rstest]
fn create_sets_equal_timestamps(draft: StudentDraft, created_at: DateTime<Utc>) {
    let student = Student::create(StudentId::random(), draft, created_at);
    assert_eq!(student.created_at(), student.updated_at());
    assert_eq!(student.email().as_ref(), "ada@example.com");
}

#[rstest]
fn restore_rejects_updated_before_created(draft: StudentDraft, created_at: DateTime<Utc>) {
    let result = Student::restore(
        StudentId::random(),
        draft,
        created_at,
        created_at - Duration::seconds(1),
    );
    assert_eq!(result, Err(StudentValidationError::UpdatedBeforeCreated));
}

#[rstest]
fn revise_replaces_fields_and_keeps_identity(draft: StudentDraft, created_at: DateTime<Utc>) {
    let student = Student::create(StudentId::random(), draft, created_at);
    let replacement =
        StudentDraft::try_from_strings("Ada King", "ada@example.com", "Physics", None)
            .expect("valid draft");
    let later = created_at + Duration::minutes(5);

    let revised = student.revise(replacement, later);

    assert_eq!(revised.id(), student.id());
    assert_eq!(revised.created_at(), created_at);
    assert_eq!(revised.updated_at(), later);
    assert_eq!(revised.name().as_ref(), "Ada King");
    assert_eq!(revised.course().as_ref(), "Physics");
    assert!(revised.profile_image_url().is_none());
}

#[rstest]
fn revise_never_moves_updated_at_backwards(draft: StudentDraft, created_at: DateTime<Utc>) {
    let student = Student::create(StudentId::random(), draft.clone(), created_at);
    let revised = student.revise(draft, created_at - Duration::hours(1));
    assert_eq!(revised.updated_at(), created_at);
}
