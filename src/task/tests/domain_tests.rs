//! Domain-focused tests for task scalars and the task aggregate.

use crate::list::domain::{ListId, UserId};
use crate::task::domain::{Position, Task, TaskDomainError, TaskTitle};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

#[rstest]
fn task_title_trims_surrounding_whitespace() {
    let title = TaskTitle::new("  Buy milk  ").expect("valid title");
    assert_eq!(title.as_str(), "Buy milk");
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\t\n")]
fn task_title_rejects_blank_input(#[case] input: &str) {
    assert_eq!(TaskTitle::new(input), Err(TaskDomainError::EmptyTitle));
}

#[rstest]
fn task_title_accepts_exactly_two_hundred_characters() {
    let input = "x".repeat(200);
    let title = TaskTitle::new(input).expect("boundary title");
    assert_eq!(title.as_str().chars().count(), 200);
}

#[rstest]
fn task_title_rejects_two_hundred_and_one_characters() {
    let input = "x".repeat(201);
    assert_eq!(
        TaskTitle::new(input),
        Err(TaskDomainError::TitleTooLong(201))
    );
}

#[rstest]
fn task_title_counts_characters_not_bytes() {
    let input = "é".repeat(200);
    assert!(TaskTitle::new(input).is_ok());
}

#[rstest]
fn position_next_increments() {
    assert_eq!(Position::ZERO.next(), Position::new(1));
    assert_eq!(Position::new(4).next(), Position::new(5));
}

#[rstest]
fn new_task_starts_incomplete_at_given_position(clock: DefaultClock) {
    let title = TaskTitle::new("Walk dog").expect("valid title");
    let task = Task::new(ListId::new(), UserId::new(), title, Position::new(3), &clock);

    assert!(!task.completed());
    assert_eq!(task.position(), Position::new(3));
    assert_eq!(task.created_at(), task.updated_at());
}

#[rstest]
fn mutators_touch_the_modification_timestamp(clock: DefaultClock) {
    let title = TaskTitle::new("Walk dog").expect("valid title");
    let mut task = Task::new(ListId::new(), UserId::new(), title, Position::ZERO, &clock);

    task.set_completed(true, &clock);
    assert!(task.completed());
    assert!(task.updated_at() >= task.created_at());

    let renamed = TaskTitle::new("Walk the dog").expect("valid title");
    task.rename(renamed, &clock);
    assert_eq!(task.title().as_str(), "Walk the dog");

    task.move_to(Position::new(2), &clock);
    assert_eq!(task.position(), Position::new(2));
}

#[rstest]
fn task_serializes_with_transparent_scalars(clock: DefaultClock) {
    let title = TaskTitle::new("Buy milk").expect("valid title");
    let task = Task::new(ListId::new(), UserId::new(), title, Position::new(1), &clock);

    let value = serde_json::to_value(&task).expect("serializable task");
    assert_eq!(value["title"], "Buy milk");
    assert_eq!(value["position"], 1);
    assert_eq!(value["completed"], false);
}

#[rstest]
fn task_round_trips_through_serde(clock: DefaultClock) {
    let title = TaskTitle::new("Buy milk").expect("valid title");
    let task = Task::new(ListId::new(), UserId::new(), title, Position::new(1), &clock);

    let encoded = serde_json::to_string(&task).expect("serializable task");
    let decoded: Task = serde_json::from_str(&encoded).expect("decodable task");
    assert_eq!(decoded, task);
}
