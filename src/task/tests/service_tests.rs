//! Service orchestration tests for the task lifecycle.

use std::sync::Arc;

use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{SpaceId, TaskDomainError, TaskId, TaskStatus, UserId},
    ports::repository::{MockTaskRepository, TaskRepositoryError},
    services::{CreateTaskRequest, TaskLifecycleError, TaskLifecycleService, TransitionOutcome},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService = TaskLifecycleService<InMemoryTaskRepository, DefaultClock>;

#[fixture]
fn service() -> TestService {
    TaskLifecycleService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(DefaultClock),
    )
}

fn space() -> SpaceId {
    SpaceId::new("G1")
}

fn user() -> UserId {
    UserId::new("U1")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_persists_pending_task_and_returns_it_unchanged(service: TestService) {
    let request = CreateTaskRequest::new(space(), user(), "Buy milk")
        .with_description("Semi-skimmed")
        .with_due_date_text("2024-01-15");

    let created = service.create(request).await.expect("creation should succeed");

    assert_eq!(created.status(), TaskStatus::Pending);
    assert_eq!(created.due_date().map(|d| d.format()).as_deref(), Some("2024-01-15"));

    let fetched = service
        .get(&space(), created.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(fetched, Some(created));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_malformed_due_date_before_any_write(service: TestService) {
    let request = CreateTaskRequest::new(space(), user(), "Buy milk")
        .with_due_date_text("2024-02-30");

    let result = service.create(request).await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::Domain(
            TaskDomainError::InvalidDateFormat(_)
        ))
    ));
    let pending = service
        .list_pending(&space())
        .await
        .expect("listing should succeed");
    assert!(pending.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_empty_title(service: TestService) {
    let request = CreateTaskRequest::new(space(), user(), "   ");
    let result = service.create(request).await;
    assert!(matches!(
        result,
        Err(TaskLifecycleError::Domain(TaskDomainError::EmptyTitle))
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn create_retries_identifier_collisions_then_succeeds() {
    let mut repository = MockTaskRepository::new();
    repository.expect_insert().times(2).returning(|task| {
        Err(TaskRepositoryError::Duplicate {
            space_id: task.space_id().clone(),
            task_id: task.id().clone(),
        })
    });
    repository.expect_insert().times(1).returning(|_| Ok(()));

    let service = TaskLifecycleService::new(Arc::new(repository), Arc::new(DefaultClock));
    let created = service
        .create(CreateTaskRequest::new(space(), user(), "Buy milk"))
        .await
        .expect("third attempt should succeed");
    assert_eq!(created.status(), TaskStatus::Pending);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_surfaces_exhausted_identifier_generation() {
    let mut repository = MockTaskRepository::new();
    repository.expect_insert().times(3).returning(|task| {
        Err(TaskRepositoryError::Duplicate {
            space_id: task.space_id().clone(),
            task_id: task.id().clone(),
        })
    });

    let service = TaskLifecycleService::new(Arc::new(repository), Arc::new(DefaultClock));
    let result = service
        .create(CreateTaskRequest::new(space(), user(), "Buy milk"))
        .await;
    assert!(matches!(
        result,
        Err(TaskLifecycleError::IdGenerationExhausted { attempts: 3 })
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn create_propagates_store_unavailability_without_retry() {
    let mut repository = MockTaskRepository::new();
    repository.expect_insert().times(1).returning(|_| {
        Err(TaskRepositoryError::unavailable(std::io::Error::other(
            "store offline",
        )))
    });

    let service = TaskLifecycleService::new(Arc::new(repository), Arc::new(DefaultClock));
    let result = service
        .create(CreateTaskRequest::new(space(), user(), "Buy milk"))
        .await;
    assert!(matches!(
        result,
        Err(TaskLifecycleError::Repository(
            TaskRepositoryError::Unavailable(_)
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_pending_excludes_done_and_deleted_tasks(service: TestService) {
    let kept = service
        .create(CreateTaskRequest::new(space(), user(), "Keep me"))
        .await
        .expect("creation should succeed");
    let done = service
        .create(CreateTaskRequest::new(space(), user(), "Finish me"))
        .await
        .expect("creation should succeed");
    let dropped = service
        .create(CreateTaskRequest::new(space(), user(), "Drop me"))
        .await
        .expect("creation should succeed");

    service
        .mark_done(&space(), done.id())
        .await
        .expect("transition should succeed");
    service
        .soft_delete(&space(), dropped.id())
        .await
        .expect("transition should succeed");

    let pending = service
        .list_pending(&space())
        .await
        .expect("listing should succeed");
    assert_eq!(pending.len(), 1);
    assert_eq!(pending.first().map(|task| task.id().clone()), Some(kept.id().clone()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mark_done_transitions_then_short_circuits(service: TestService) {
    let created = service
        .create(
            CreateTaskRequest::new(space(), user(), "Buy milk")
                .with_due_date_text("2024-01-15"),
        )
        .await
        .expect("creation should succeed");

    let first = service
        .mark_done(&space(), created.id())
        .await
        .expect("transition should succeed");
    let TransitionOutcome::Transitioned(done) = first else {
        panic!("expected Transitioned, got {first:?}");
    };
    assert_eq!(done.status(), TaskStatus::Done);

    let second = service
        .mark_done(&space(), created.id())
        .await
        .expect("repeat should succeed");
    let TransitionOutcome::AlreadyInState(still_done) = second else {
        panic!("expected AlreadyInState, got {second:?}");
    };
    assert_eq!(still_done.status(), TaskStatus::Done);
    // Idempotent repeat rewrites nothing.
    assert_eq!(still_done, done);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn soft_delete_applies_to_pending_and_done_tasks(service: TestService) {
    let pending = service
        .create(CreateTaskRequest::new(space(), user(), "Pending task"))
        .await
        .expect("creation should succeed");
    let done = service
        .create(CreateTaskRequest::new(space(), user(), "Done task"))
        .await
        .expect("creation should succeed");
    service
        .mark_done(&space(), done.id())
        .await
        .expect("transition should succeed");

    for task_id in [pending.id(), done.id()] {
        let outcome = service
            .soft_delete(&space(), task_id)
            .await
            .expect("deletion should succeed");
        assert!(matches!(outcome, TransitionOutcome::Transitioned(_)));
        assert_eq!(outcome.task().status(), TaskStatus::Deleted);
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn soft_delete_repeat_short_circuits(service: TestService) {
    let created = service
        .create(CreateTaskRequest::new(space(), user(), "Drop me"))
        .await
        .expect("creation should succeed");
    service
        .soft_delete(&space(), created.id())
        .await
        .expect("deletion should succeed");

    let repeat = service
        .soft_delete(&space(), created.id())
        .await
        .expect("repeat should succeed");
    assert!(matches!(repeat, TransitionOutcome::AlreadyInState(_)));
    assert_eq!(repeat.task().status(), TaskStatus::Deleted);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mark_done_refuses_deleted_tasks(service: TestService) {
    let created = service
        .create(CreateTaskRequest::new(space(), user(), "Drop me"))
        .await
        .expect("creation should succeed");
    service
        .soft_delete(&space(), created.id())
        .await
        .expect("deletion should succeed");

    let result = service.mark_done(&space(), created.id()).await;
    assert!(matches!(
        result,
        Err(TaskLifecycleError::InvalidTransition {
            from: TaskStatus::Deleted,
            to: TaskStatus::Done,
            ..
        })
    ));

    // The deleted record is untouched.
    let stored = service
        .get(&space(), created.id())
        .await
        .expect("lookup should succeed")
        .expect("record should remain in storage");
    assert_eq!(stored.status(), TaskStatus::Deleted);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn transitions_on_unknown_task_return_not_found(service: TestService) {
    let unknown = TaskId::parse("0123abcd").expect("valid identifier");

    let done = service.mark_done(&space(), &unknown).await;
    assert!(matches!(done, Err(TaskLifecycleError::NotFound { .. })));

    let deleted = service.soft_delete(&space(), &unknown).await;
    assert!(matches!(deleted, Err(TaskLifecycleError::NotFound { .. })));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn get_returns_none_for_unknown_task(service: TestService) {
    let unknown = TaskId::parse("0123abcd").expect("valid identifier");
    let fetched = service
        .get(&space(), &unknown)
        .await
        .expect("lookup should succeed");
    assert!(fetched.is_none());
}
