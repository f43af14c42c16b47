//! Unit tests for three-state field updates and patch merging.

use crate::task::domain::{
    DueDate, FieldUpdate, SpaceConfig, SpaceConfigPatch, SpaceId, Task, TaskId, TaskPatch,
    TaskStatus, TaskTitle, UserId, ChannelId,
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

#[fixture]
fn task(clock: DefaultClock) -> Task {
    Task::new(
        TaskId::generate(),
        SpaceId::new("G1"),
        UserId::new("U1"),
        TaskTitle::new("Original title").expect("valid title"),
        Some("Original description".to_owned()),
        Some(DueDate::parse("2024-01-15").expect("valid date")),
        &clock,
    )
}

#[rstest]
fn field_update_keep_preserves_current_value() {
    let update: FieldUpdate<String> = FieldUpdate::Keep;
    assert_eq!(update.apply(Some("kept".to_owned())), Some("kept".to_owned()));
    let update_of_absent: FieldUpdate<String> = FieldUpdate::Keep;
    assert_eq!(update_of_absent.apply(None), None);
}

#[rstest]
fn field_update_clear_discards_current_value() {
    let update: FieldUpdate<String> = FieldUpdate::Clear;
    assert_eq!(update.apply(Some("gone".to_owned())), None);
}

#[rstest]
fn field_update_set_replaces_current_value() {
    let update = FieldUpdate::Set("new".to_owned());
    assert_eq!(update.apply(Some("old".to_owned())), Some("new".to_owned()));
}

#[rstest]
fn default_patch_is_empty() {
    assert!(TaskPatch::new().is_empty());
    assert!(!TaskPatch::new().with_status(TaskStatus::Done).is_empty());
    assert!(
        !TaskPatch::new()
            .with_description(FieldUpdate::Clear)
            .is_empty()
    );
}

#[rstest]
fn empty_patch_does_not_touch_updated_at(clock: DefaultClock, task: Task) {
    let mut patched = task.clone();
    patched.apply_patch(TaskPatch::new(), &clock);
    assert_eq!(patched, task);
}

#[rstest]
fn patch_merges_only_supplied_fields(clock: DefaultClock, task: Task) {
    let mut patched = task.clone();
    let patch = TaskPatch::new()
        .with_title(TaskTitle::new("New title").expect("valid title"))
        .with_due_date(FieldUpdate::Clear);

    patched.apply_patch(patch, &clock);

    assert_eq!(patched.title().as_str(), "New title");
    assert_eq!(patched.due_date(), None);
    // Untouched fields keep their stored values.
    assert_eq!(patched.description(), Some("Original description"));
    assert_eq!(patched.status(), task.status());
    assert_eq!(patched.created_at(), task.created_at());
    assert!(patched.updated_at() >= task.updated_at());
}

#[rstest]
fn patch_clears_description_distinctly_from_keeping_it(clock: DefaultClock, task: Task) {
    let mut cleared = task.clone();
    cleared.apply_patch(
        TaskPatch::new().with_description(FieldUpdate::Clear),
        &clock,
    );
    assert_eq!(cleared.description(), None);

    let mut kept = task.clone();
    kept.apply_patch(TaskPatch::new().with_due_date(FieldUpdate::Clear), &clock);
    assert_eq!(kept.description(), Some("Original description"));
}

#[rstest]
fn space_config_patch_sets_and_clears_channel() {
    let mut config = SpaceConfig::new(SpaceId::new("G1"));

    config.apply_patch(
        SpaceConfigPatch::new()
            .with_notification_channel(FieldUpdate::Set(ChannelId::new(42))),
    );
    assert_eq!(config.notification_channel_id(), Some(ChannelId::new(42)));

    config.apply_patch(
        SpaceConfigPatch::new().with_notification_channel(FieldUpdate::Clear),
    );
    assert_eq!(config.notification_channel_id(), None);
}
