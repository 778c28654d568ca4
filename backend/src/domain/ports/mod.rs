//! Domain ports for the hexagonal boundary.

mod student_command;
mod student_query;
mod student_repository;

#[cfg(test)]
pub use student_command::MockStudentCommand;
pub use student_command::StudentCommand;
#[cfg(test)]
pub use student_query::MockStudentQuery;
pub use student_query::StudentQuery;
#[cfg(test)]
pub use student_repository::MockStudentRepository;
pub use student_repository::{StudentRepository, StudentRepositoryError};
