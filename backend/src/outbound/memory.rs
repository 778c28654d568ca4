//! Process-local student repository.
//!
//! Used when no database is configured and by tests. Records live in a
//! `Vec` behind a Tokio `RwLock`, so listings keep insertion order and the
//! duplicate-email check shares the write lock with the write itself.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::ports::{StudentRepository, StudentRepositoryError};
use crate::domain::{
    Email, SearchTerm, Student, StudentDraft, StudentId, matches_course, matches_search_term,
};

/// In-memory implementation of [`StudentRepository`].
#[derive(Debug, Default)]
pub struct InMemoryStudentRepository {
    students: RwLock<Vec<Student>>,
}

impl InMemoryStudentRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    async fn filtered<F>(&self, predicate: F) -> Vec<Student>
    where
        F: Fn(&Student) -> bool,
    {
        self.students
            .read()
            .await
            .iter()
            .filter(|student| predicate(student))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn insert(
        &self,
        draft: StudentDraft,
        now: DateTime<Utc>,
    ) -> Result<Student, StudentRepositoryError> {
        let mut students = self.students.write().await;
        if students.iter().any(|s| s.email() == &draft.email) {
            return Err(StudentRepositoryError::duplicate_email(draft.email));
        }
        let student = Student::create(StudentId::random(), draft, now);
        students.push(student.clone());
        Ok(student)
    }

    async fn find_by_id(&self, id: &StudentId) -> Result<Option<Student>, StudentRepositoryError> {
        let students = self.students.read().await;
        Ok(students.iter().find(|s| s.id() == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Student>, StudentRepositoryError> {
        Ok(self.students.read().await.clone())
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<Student>, StudentRepositoryError> {
        let students = self.students.read().await;
        Ok(students.iter().find(|s| s.email() == email).cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> Result<bool, StudentRepositoryError> {
        let students = self.students.read().await;
        Ok(students.iter().any(|s| s.email() == email))
    }

    async fn replace(&self, student: &Student) -> Result<(), StudentRepositoryError> {
        let mut students = self.students.write().await;
        if students
            .iter()
            .any(|s| s.email() == student.email() && s.id() != student.id())
        {
            return Err(StudentRepositoryError::duplicate_email(
                student.email().clone(),
            ));
        }
        let slot = students
            .iter_mut()
            .find(|s| s.id() == student.id())
            .ok_or_else(|| StudentRepositoryError::missing(student.id().to_string()))?;
        *slot = student.clone();
        Ok(())
    }

    async fn delete_by_id(&self, id: &StudentId) -> Result<bool, StudentRepositoryError> {
        let mut students = self.students.write().await;
        let before = students.len();
        students.retain(|s| s.id() != id);
        Ok(students.len() != before)
    }

    async fn search(&self, term: &SearchTerm) -> Result<Vec<Student>, StudentRepositoryError> {
        Ok(self
            .filtered(|student| matches_search_term(student, term))
            .await)
    }

    async fn find_by_course(&self, course: &str) -> Result<Vec<Student>, StudentRepositoryError> {
        Ok(self
            .filtered(|student| matches_course(student, course))
            .await)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use rstest::{fixture, rstest};

    fn draft(name: &str, email: &str, course: &str) -> StudentDraft {
        StudentDraft::try_from_strings(name, email, course, None).expect("valid draft")
    }

    #[fixture]
    fn repo() -> InMemoryStudentRepository {
        InMemoryStudentRepository::new()
    }

    #[rstest]
    #[tokio::test]
    async fn insert_assigns_identity_and_keeps_order(repo: InMemoryStudentRepository) {
        let now = Utc::now();
        let ada = repo
            .insert(draft("Ada Lovelace", "ada@example.com", "Mathematics"), now)
            .await
            .expect("insert ada");
        let grace = repo
            .insert(draft("Grace Hopper", "grace@example.com", "Engineering"), now)
            .await
            .expect("insert grace");

        assert_ne!(ada.id(), grace.id());
        let all = repo.find_all().await.expect("list");
        let ids: Vec<_> = all.iter().map(|s| *s.id()).collect();
        assert_eq!(ids, vec![*ada.id(), *grace.id()]);
    }

    #[rstest]
    #[tokio::test]
    async fn insert_rejects_duplicate_email(repo: InMemoryStudentRepository) {
        repo.insert(draft("Ada Lovelace", "ada@example.com", "Mathematics"), Utc::now())
            .await
            .expect("first insert");

        let result = repo
            .insert(draft("Ada King", "ada@example.com", "Physics"), Utc::now())
            .await;

        assert!(matches!(
            result,
            Err(StudentRepositoryError::DuplicateEmail { .. })
        ));
        assert_eq!(repo.find_all().await.expect("list").len(), 1);
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_duplicate_inserts_yield_one_record() {
        let repo = Arc::new(InMemoryStudentRepository::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move {
                    repo.insert(
                        draft(&format!("Student {i}"), "same@example.com", "Mathematics"),
                        Utc::now(),
                    )
                    .await
                })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            if handle.await.expect("task completes").is_ok() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(repo.find_all().await.expect("list").len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn replace_rejects_foreign_email_and_missing_records(repo: InMemoryStudentRepository) {
        let now = Utc::now();
        let ada = repo
            .insert(draft("Ada Lovelace", "ada@example.com", "Mathematics"), now)
            .await
            .expect("insert ada");
        repo.insert(draft("Grace Hopper", "grace@example.com", "Engineering"), now)
            .await
            .expect("insert grace");

        let stolen = ada.revise(draft("Ada Lovelace", "grace@example.com", "Mathematics"), now);
        assert!(matches!(
            repo.replace(&stolen).await,
            Err(StudentRepositoryError::DuplicateEmail { .. })
        ));

        let ghost = Student::create(
            StudentId::random(),
            draft("Nobody", "nobody@example.com", "History"),
            now,
        );
        assert!(matches!(
            repo.replace(&ghost).await,
            Err(StudentRepositoryError::Missing { .. })
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn delete_reports_whether_a_record_was_removed(repo: InMemoryStudentRepository) {
        let ada = repo
            .insert(draft("Ada Lovelace", "ada@example.com", "Mathematics"), Utc::now())
            .await
            .expect("insert");

        assert!(repo.delete_by_id(ada.id()).await.expect("first delete"));
        assert!(!repo.delete_by_id(ada.id()).await.expect("second delete"));
    }

    #[rstest]
    #[tokio::test]
    async fn search_and_course_filters_ignore_case(repo: InMemoryStudentRepository) {
        let now = Utc::now();
        for (name, email, course) in [
            ("Ada Lovelace", "ada@example.com", "Mathematics"),
            ("Grace Hopper", "grace@example.com", "Engineering"),
            ("Eng Li", "li@example.com", "History"),
            ("Alan Turing", "alan@example.com", "mathematics"),
        ] {
            repo.insert(draft(name, email, course), now)
                .await
                .expect("insert");
        }

        let found = repo.search(&SearchTerm::new("ENG")).await.expect("search");
        let names: Vec<_> = found.iter().map(|s| s.name().to_string()).collect();
        assert_eq!(names, vec!["Grace Hopper", "Eng Li"]);

        let maths = repo.find_by_course("MATHEMATICS").await.expect("course");
        assert_eq!(maths.len(), 2);
    }
}
