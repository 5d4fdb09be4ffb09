//! Service orchestration tests for the list catalogue.

use std::sync::Arc;

use crate::list::{
    adapters::memory::InMemoryListRepository,
    domain::{ListId, ListQuery, ListSort, UserId},
    ports::generator::MockListGenerator,
    ports::{GeneratedList, ListGeneratorError},
    services::{ListCatalogueError, ListCatalogueService, ListUpdate},
};
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Position, Task, TaskTitle},
    ports::TaskRepository,
};
use mockable::DefaultClock;
use rstest::rstest;

type TestService = ListCatalogueService<
    InMemoryListRepository,
    InMemoryTaskRepository,
    MockListGenerator,
    DefaultClock,
>;

fn service_with(generator: MockListGenerator) -> (TestService, Arc<InMemoryTaskRepository>) {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let service = ListCatalogueService::new(
        Arc::new(InMemoryListRepository::new()),
        Arc::clone(&tasks),
        Arc::new(generator),
        Arc::new(DefaultClock),
    );
    (service, tasks)
}

fn service() -> (TestService, Arc<InMemoryTaskRepository>) {
    // No generation expected; the mock panics if the port is reached.
    service_with(MockListGenerator::new())
}

async fn seed_task(tasks: &InMemoryTaskRepository, list_id: ListId, owner: UserId, index: usize) {
    let title = TaskTitle::new(format!("Task {index}")).expect("valid task title");
    let task = Task::new(list_id, owner, title, Position::new(index), &DefaultClock);
    tasks.insert(&task).await.expect("task stored");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_persists_and_is_retrievable() {
    let (catalogue, _tasks) = service();
    let owner = UserId::new();

    let created = catalogue
        .create(owner, "Groceries")
        .await
        .expect("list created");
    let fetched = catalogue
        .get(owner, created.id())
        .await
        .expect("list fetched");

    assert_eq!(fetched, created);
    assert!(!fetched.favorited());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_duplicate_title_per_owner() {
    let (catalogue, _tasks) = service();
    let owner = UserId::new();
    catalogue
        .create(owner, "Groceries")
        .await
        .expect("first list created");

    let result = catalogue.create(owner, "Groceries").await;
    assert!(matches!(
        result,
        Err(ListCatalogueError::DuplicateTitle(title)) if title == "Groceries"
    ));

    // A different owner may reuse the title.
    catalogue
        .create(UserId::new(), "Groceries")
        .await
        .expect("other owner may reuse the title");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_blank_title() {
    let (catalogue, _tasks) = service();

    let result = catalogue.create(UserId::new(), "   ").await;
    assert!(matches!(result, Err(ListCatalogueError::Validation(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_renames_and_favorites() {
    let (catalogue, _tasks) = service();
    let owner = UserId::new();
    let created = catalogue
        .create(owner, "Groceries")
        .await
        .expect("list created");

    let updated = catalogue
        .update(
            owner,
            created.id(),
            ListUpdate::default()
                .with_title("Weekly groceries")
                .with_favorited(true),
        )
        .await
        .expect("list updated");

    assert_eq!(updated.title().as_str(), "Weekly groceries");
    assert!(updated.favorited());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_unknown_list_is_rejected() {
    let (catalogue, _tasks) = service();

    let result = catalogue
        .update(UserId::new(), ListId::new(), ListUpdate::default())
        .await;
    assert!(matches!(result, Err(ListCatalogueError::NotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn query_filters_by_favorited_flag() {
    let (catalogue, _tasks) = service();
    let owner = UserId::new();
    let kept = catalogue
        .create(owner, "Groceries")
        .await
        .expect("list created");
    catalogue
        .create(owner, "Chores")
        .await
        .expect("list created");
    catalogue
        .update(owner, kept.id(), ListUpdate::default().with_favorited(true))
        .await
        .expect("list favorited");

    let favorites = catalogue
        .query(owner, &ListQuery::default().with_favorited(true))
        .await
        .expect("query succeeds");

    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites.first().map(|list| list.id()), Some(kept.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn query_searches_titles_case_insensitively() {
    let (catalogue, _tasks) = service();
    let owner = UserId::new();
    catalogue
        .create(owner, "Weekly Groceries")
        .await
        .expect("list created");
    catalogue
        .create(owner, "Chores")
        .await
        .expect("list created");

    let found = catalogue
        .query(owner, &ListQuery::default().with_search("groc"))
        .await
        .expect("query succeeds");

    assert_eq!(found.len(), 1);
    assert_eq!(
        found.first().map(|list| list.title().as_str()),
        Some("Weekly Groceries")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn query_sorts_and_paginates_by_title() {
    let (catalogue, _tasks) = service();
    let owner = UserId::new();
    for title in ["Cleaning", "Books", "Appointments"] {
        catalogue.create(owner, title).await.expect("list created");
    }

    let first_page = catalogue
        .query(
            owner,
            &ListQuery::default()
                .with_sort(ListSort::TitleAscending)
                .with_limit(2),
        )
        .await
        .expect("query succeeds");
    let titles: Vec<&str> = first_page.iter().map(|list| list.title().as_str()).collect();
    assert_eq!(titles, vec!["Appointments", "Books"]);

    let second_page = catalogue
        .query(
            owner,
            &ListQuery::default()
                .with_sort(ListSort::TitleAscending)
                .with_limit(2)
                .with_page(2),
        )
        .await
        .expect("query succeeds");
    let remaining: Vec<&str> = second_page.iter().map(|list| list.title().as_str()).collect();
    assert_eq!(remaining, vec!["Cleaning"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_from_prompt_seeds_tasks_in_order() {
    let mut generator = MockListGenerator::new();
    generator.expect_generate().returning(|_| {
        Ok(GeneratedList {
            title: "Camping trip".to_owned(),
            task_titles: vec![
                "Pack tent".to_owned(),
                "Check weather".to_owned(),
                "Buy firewood".to_owned(),
            ],
        })
    });
    let (catalogue, tasks) = service_with(generator);
    let owner = UserId::new();

    let (list, seeded) = catalogue
        .create_from_prompt(owner, "plan a camping weekend")
        .await
        .expect("prompt creation succeeds");

    assert_eq!(list.title().as_str(), "Camping trip");
    assert_eq!(seeded.len(), 3);
    let stored = tasks
        .list_ordered(list.id(), owner)
        .await
        .expect("tasks readable");
    for (index, task) in stored.iter().enumerate() {
        assert_eq!(task.position(), Position::new(index));
        assert!(!task.completed());
    }
    assert_eq!(
        stored.first().map(|task| task.title().as_str()),
        Some("Pack tent")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_from_prompt_rejects_blank_prompt() {
    let (catalogue, _tasks) = service();

    let result = catalogue.create_from_prompt(UserId::new(), "  ").await;
    assert!(matches!(result, Err(ListCatalogueError::EmptyPrompt)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_from_prompt_surfaces_generator_rejection() {
    let mut generator = MockListGenerator::new();
    generator.expect_generate().returning(|_| {
        Err(ListGeneratorError::Rejected(
            "prompt does not describe a list".to_owned(),
        ))
    });
    let (catalogue, _tasks) = service_with(generator);

    let result = catalogue
        .create_from_prompt(UserId::new(), "gibberish")
        .await;
    assert!(matches!(
        result,
        Err(ListCatalogueError::Generator(ListGeneratorError::Rejected(_)))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_cascades_task_removal() {
    let (catalogue, tasks) = service();
    let owner = UserId::new();
    let list = catalogue
        .create(owner, "Groceries")
        .await
        .expect("list created");
    for index in 0..3 {
        seed_task(&tasks, list.id(), owner, index).await;
    }

    catalogue
        .delete(owner, list.id())
        .await
        .expect("delete succeeds");

    assert!(matches!(
        catalogue.get(owner, list.id()).await,
        Err(ListCatalogueError::NotFound(_))
    ));
    let remaining = tasks
        .list_ordered(list.id(), owner)
        .await
        .expect("tasks readable");
    assert!(remaining.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_unknown_list_is_rejected() {
    let (catalogue, _tasks) = service();

    let result = catalogue.delete(UserId::new(), ListId::new()).await;
    assert!(matches!(result, Err(ListCatalogueError::NotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_all_removes_only_the_callers_data() {
    let (catalogue, tasks) = service();
    let owner = UserId::new();
    let bystander = UserId::new();

    let mine = catalogue
        .create(owner, "Groceries")
        .await
        .expect("list created");
    seed_task(&tasks, mine.id(), owner, 0).await;
    let theirs = catalogue
        .create(bystander, "Groceries")
        .await
        .expect("list created");
    seed_task(&tasks, theirs.id(), bystander, 0).await;

    catalogue.delete_all(owner).await.expect("delete_all succeeds");

    assert!(catalogue
        .query(owner, &ListQuery::default())
        .await
        .expect("query succeeds")
        .is_empty());
    let bystander_lists = catalogue
        .query(bystander, &ListQuery::default())
        .await
        .expect("query succeeds");
    assert_eq!(bystander_lists.len(), 1);
    let bystander_tasks = tasks
        .list_ordered(theirs.id(), bystander)
        .await
        .expect("tasks readable");
    assert_eq!(bystander_tasks.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn purge_user_clears_the_catalogue() {
    let (catalogue, tasks) = service();
    let owner = UserId::new();
    let list = catalogue
        .create(owner, "Groceries")
        .await
        .expect("list created");
    seed_task(&tasks, list.id(), owner, 0).await;

    catalogue.purge_user(owner).await.expect("purge succeeds");

    assert!(catalogue
        .query(owner, &ListQuery::default())
        .await
        .expect("query succeeds")
        .is_empty());
    let remaining = tasks
        .list_ordered(list.id(), owner)
        .await
        .expect("tasks readable");
    assert!(remaining.is_empty());
}
