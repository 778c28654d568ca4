//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{StudentCommand, StudentQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub students: Arc<dyn StudentCommand>,
    pub students_query: Arc<dyn StudentQuery>,
}

impl HttpState {
    /// Construct state from the command and query ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use student_registry::domain::StudentService;
    /// use student_registry::inbound::http::state::HttpState;
    /// use student_registry::outbound::memory::InMemoryStudentRepository;
    ///
    /// let service = Arc::new(StudentService::new(
    ///     Arc::new(InMemoryStudentRepository::new()),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let state = HttpState::new(service.clone(), service);
    /// let _students = state.students.clone();
    /// ```
    pub fn new(students: Arc<dyn StudentCommand>, students_query: Arc<dyn StudentQuery>) -> Self {
        Self {
            students,
            students_query,
        }
    }
}
