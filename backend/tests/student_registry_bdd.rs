//! Behaviour tests for the student registry service.
//!
//! Scenarios drive `StudentService` over the in-memory store so the
//! uniqueness, search and deletion rules are exercised end to end.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use student_registry::domain::ports::{StudentCommand, StudentQuery};
use student_registry::domain::{
    Error, ErrorCode, SearchTerm, Student, StudentDraft, StudentId, StudentService,
};
use student_registry::outbound::memory::InMemoryStudentRepository;
use tokio::runtime::Runtime;

type Service = StudentService<InMemoryStudentRepository>;

struct RegistryWorld {
    runtime: Runtime,
    service: Service,
    ids: RefCell<HashMap<String, StudentId>>,
    last_outcome: RefCell<Option<Result<(), Error>>>,
    listed: RefCell<Vec<Student>>,
}

impl RegistryWorld {
    fn new() -> Self {
        let runtime = Runtime::new().expect("tokio runtime should initialize");
        let service = StudentService::new(
            Arc::new(InMemoryStudentRepository::new()),
            Arc::new(DefaultClock),
        );
        Self {
            runtime,
            service,
            ids: RefCell::new(HashMap::new()),
            last_outcome: RefCell::new(None),
            listed: RefCell::new(Vec::new()),
        }
    }

    fn draft(name: &str, email: &str, course: &str) -> StudentDraft {
        StudentDraft::try_from_strings(name, email, course, None).expect("valid student draft")
    }

    fn all(&self) -> Vec<Student> {
        self.runtime
            .block_on(self.service.list())
            .expect("listing should succeed")
    }

    fn id_of(&self, name: &str) -> StudentId {
        *self
            .ids
            .borrow()
            .get(name)
            .expect("student should have been seeded")
    }

    fn named(&self, name: &str) -> Option<Student> {
        self.all()
            .into_iter()
            .find(|student| student.name().as_ref() == name)
    }

    fn record(&self, outcome: Result<(), Error>) {
        *self.last_outcome.borrow_mut() = Some(outcome);
    }

    fn with_error<F>(&self, f: F)
    where
        F: FnOnce(&Error),
    {
        let outcome = self.last_outcome.borrow();
        match outcome.as_ref().expect("an operation was attempted") {
            Ok(()) => panic!("expected the operation to fail"),
            Err(error) => f(error),
        }
    }
}

#[fixture]
fn world() -> RegistryWorld {
    RegistryWorld::new()
}

#[given("a student \"{name}\" with email \"{email}\" studying \"{course}\"")]
fn a_student(world: &RegistryWorld, name: String, email: String, course: String) {
    let student = world
        .runtime
        .block_on(world.service.create(RegistryWorld::draft(&name, &email, &course)))
        .expect("seed student should be created");
    world.ids.borrow_mut().insert(name, *student.id());
}

#[when("another student \"{name}\" registers with email \"{email}\" studying \"{course}\"")]
fn another_student_registers(world: &RegistryWorld, name: String, email: String, course: String) {
    let result = world
        .runtime
        .block_on(world.service.create(RegistryWorld::draft(&name, &email, &course)));
    world.record(result.map(|_| ()));
}

#[when("the registry is searched for \"{term}\"")]
fn the_registry_is_searched(world: &RegistryWorld, term: String) {
    let found = world
        .runtime
        .block_on(world.service.search(&SearchTerm::new(term)))
        .expect("search should succeed");
    *world.listed.borrow_mut() = found;
}

#[when("students on course \"{course}\" are listed")]
fn students_on_course_are_listed(world: &RegistryWorld, course: String) {
    let found = world
        .runtime
        .block_on(world.service.list_by_course(&course))
        .expect("course listing should succeed");
    *world.listed.borrow_mut() = found;
}

#[when("the student \"{name}\" is deleted")]
fn the_student_is_deleted(world: &RegistryWorld, name: String) {
    let id = world.id_of(&name);
    let result = world.runtime.block_on(world.service.delete(&id));
    world.record(result);
}

#[when("the student \"{name}\" is renamed to \"{new_name}\" keeping email \"{email}\"")]
fn the_student_is_renamed(world: &RegistryWorld, name: String, new_name: String, email: String) {
    let student = world.named(&name).expect("student should exist");
    let draft = RegistryWorld::draft(&new_name, &email, student.course().as_ref());
    let result = world
        .runtime
        .block_on(world.service.update(&world.id_of(&name), draft));
    world.record(result.map(|_| ()));
}

#[then("the registration fails with a conflict")]
fn the_registration_fails_with_a_conflict(world: &RegistryWorld) {
    world.with_error(|error| assert_eq!(error.code(), ErrorCode::Conflict));
}

#[then("the last operation fails with not found")]
fn the_last_operation_fails_with_not_found(world: &RegistryWorld) {
    world.with_error(|error| assert_eq!(error.code(), ErrorCode::NotFound));
}

#[then("the last operation succeeds")]
fn the_last_operation_succeeds(world: &RegistryWorld) {
    let outcome = world.last_outcome.borrow();
    assert!(
        matches!(outcome.as_ref(), Some(Ok(()))),
        "expected success, got {outcome:?}"
    );
}

#[then("the number of registered students is {count}")]
fn the_number_of_registered_students_is(world: &RegistryWorld, count: usize) {
    assert_eq!(world.all().len(), count);
}

#[then("the matching students are \"{names}\"")]
fn the_matching_students_are(world: &RegistryWorld, names: String) {
    let expected: Vec<&str> = names.split(", ").collect();
    let listed = world.listed.borrow();
    let actual: Vec<&str> = listed.iter().map(|s| s.name().as_ref()).collect();
    assert_eq!(actual, expected);
}

#[then("the student with email \"{email}\" is named \"{name}\"")]
fn the_student_with_email_is_named(world: &RegistryWorld, email: String, name: String) {
    let student = world
        .all()
        .into_iter()
        .find(|student| student.email().as_ref() == email)
        .expect("student should exist");
    assert_eq!(student.name().as_ref(), name);
}

#[scenario(path = "tests/features/student_registry.feature")]
fn student_registry_scenarios(world: RegistryWorld) {
    drop(world);
}
