//! Search and course predicates shared by repository adapters.
//!
//! Terms are matched literally: regex metacharacters carry no special
//! meaning, so `c++` finds "C++ Programming".

use super::Student;

/// Case-insensitive free-text search term.
///
/// An empty term matches every record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    raw: String,
    folded: String,
}

impl SearchTerm {
    /// Build a search term from user input. Whitespace is kept as-is.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let folded = raw.to_lowercase();
        Self { raw, folded }
    }

    /// The term as supplied.
    pub fn as_str(&self) -> &str {
        self.raw.as_str()
    }

    /// Lower-cased form used for comparisons.
    pub fn folded(&self) -> &str {
        self.folded.as_str()
    }

    /// Whether the term is empty and therefore matches everything.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

/// True when the term occurs in the name, email or course, ignoring case.
pub fn matches_search_term(student: &Student, term: &SearchTerm) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.folded();
    [
        student.name().as_ref(),
        student.email().as_ref(),
        student.course().as_ref(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}

/// True when the course equals `course` ignoring case.
pub fn matches_course(student: &Student, course: &str) -> bool {
    student.course().as_ref().to_lowercase() == course.to_lowercase()
}
