//! File-backed resource service.

mod common;

use std::fs;

use coursedesk::app::{ManagedList, SearchKeys};
use coursedesk::domain::{Category, CategoryDraft, CategoryPatch, Course, CourseDraft, Role, RoleDraft};
use coursedesk::service::{JsonFileService, ResourceService};
use coursedesk::{Config, ServiceError};

fn draft(name: &str) -> CategoryDraft {
    CategoryDraft {
        name: name.into(),
        description: None,
    }
}

#[tokio::test]
async fn missing_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("categories.json");

    let service: JsonFileService<Category> = JsonFileService::open(&path).unwrap();

    assert!(service.list().await.unwrap().is_empty());
    assert!(!path.exists());
}

#[tokio::test]
async fn create_assigns_sequential_ids_and_timestamps() {
    let dir = tempfile::tempdir().unwrap();
    let service: JsonFileService<Category> = JsonFileService::open(dir.path().join("categories.json")).unwrap();

    let first = service.create(draft("Design")).await.unwrap();
    let second = service.create(draft("Programming")).await.unwrap();

    assert_eq!((first.id, second.id), (1, 2));
    assert!(first.created_at.is_some());
    assert_eq!(first.course_count, Some(0));
}

#[tokio::test]
async fn records_persist_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("categories.json");

    {
        let service: JsonFileService<Category> = JsonFileService::open(&path).unwrap();
        service.create(draft("Design")).await.unwrap();
        service.create(draft("Marketing")).await.unwrap();
        service
            .update(
                &1,
                CategoryPatch {
                    name: Some("UX Design".into()),
                    description: None,
                },
            )
            .await
            .unwrap();
    }

    let reopened: JsonFileService<Category> = JsonFileService::open(&path).unwrap();
    let names: Vec<String> = reopened.list().await.unwrap().into_iter().map(|c| c.name).collect();
    assert_eq!(names, ["UX Design", "Marketing"]);

    let third = reopened.create(draft("Data")).await.unwrap();
    assert_eq!(third.id, 3);
}

#[tokio::test]
async fn writes_are_atomic_without_leftover_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("categories.json");
    let service: JsonFileService<Category> = JsonFileService::open(&path).unwrap();

    service.create(draft("Design")).await.unwrap();

    assert!(path.exists());
    assert!(!path.with_extension("tmp").exists());
    let stored: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(stored["version"], 1);
    assert_eq!(stored["next_id"], 2);
    assert_eq!(stored["records"][0]["name"], "Design");
}

#[tokio::test]
async fn accepts_bare_array_fixture() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("categories.json");
    fs::write(&path, r#"[{"id": 4, "name": "Design"}, {"id": 9, "name": "Music"}]"#).unwrap();

    let service: JsonFileService<Category> = JsonFileService::open(&path).unwrap();

    assert_eq!(service.list().await.unwrap().len(), 2);
    assert_eq!(service.create(draft("Art")).await.unwrap().id, 10);
}

#[tokio::test]
async fn accepts_data_envelope_fixture() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("courses.json");
    fs::write(
        &path,
        r#"{"data": [{"id": 1, "title": "Intro to Rust", "status": "published", "price": 0.0}]}"#,
    )
    .unwrap();

    let service: JsonFileService<Course> = JsonFileService::open(&path).unwrap();
    let courses = service.list().await.unwrap();

    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].title, "Intro to Rust");
}

#[test]
fn rejects_malformed_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("categories.json");
    fs::write(&path, "{ not json").unwrap();

    assert!(JsonFileService::<Category>::open(&path).is_err());
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let service: JsonFileService<Category> = JsonFileService::open(dir.path().join("c.json")).unwrap();

    let err = service.delete(&42).await.unwrap_err();

    assert_eq!(err, ServiceError::not_found("category 42 not found"));
}

#[tokio::test]
async fn rejected_mutation_leaves_store_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("courses.json");
    let service: JsonFileService<Course> = JsonFileService::open(&path).unwrap();
    service
        .create(CourseDraft {
            title: "Rust".into(),
            ..CourseDraft::default()
        })
        .await
        .unwrap();
    let before = fs::read_to_string(&path).unwrap();

    let err = service
        .create(CourseDraft {
            title: "Negative".into(),
            price: Some(-1.0),
            ..CourseDraft::default()
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Validation(_)));
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
    assert_eq!(service.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn system_roles_are_protected_server_side() {
    let dir = tempfile::tempdir().unwrap();
    let service =
        JsonFileService::with_records(dir.path().join("roles.json"), vec![common::admin_role()]).unwrap();

    assert!(service.delete(&1).await.is_err());

    let created = service
        .create(RoleDraft {
            name: "Reviewer".into(),
            ..RoleDraft::default()
        })
        .await
        .unwrap();
    assert!(!created.is_system);
    service.delete(&created.id).await.unwrap();

    let remaining: Vec<Role> = service.list().await.unwrap();
    assert_eq!(remaining.len(), 1);
}

#[tokio::test]
async fn drives_a_managed_list() {
    let dir = tempfile::tempdir().unwrap();
    let service =
        JsonFileService::with_records(dir.path().join("categories.json"), common::categories(&["Alpha", "Beta"]))
            .unwrap();
    let mut list = ManagedList::new(service, "Categories", "categories", SearchKeys::new(["name"]), &Config::default());

    list.mount().await.unwrap();
    list.handle_add(draft("Gamma")).await.unwrap();
    list.handle_delete(1).await.unwrap();

    let reopened: JsonFileService<Category> = JsonFileService::open(dir.path().join("categories.json")).unwrap();
    let names: Vec<String> = reopened.list().await.unwrap().into_iter().map(|c| c.name).collect();
    assert_eq!(names, ["Beta", "Gamma"]);
}

#[test]
fn maximal_id_in_fixture_is_rejected_on_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("categories.json");
    fs::write(&path, format!(r#"[{{"id": {}, "name": "Last"}}]"#, u64::MAX)).unwrap();

    let err = JsonFileService::<Category>::open(&path).err().unwrap();

    assert!(matches!(err, coursedesk::ConsoleError::Storage(_)));
}

#[test]
fn maximal_id_is_rejected_when_seeding() {
    let dir = tempfile::tempdir().unwrap();

    let result = JsonFileService::with_records(dir.path().join("c.json"), vec![Category::new(u64::MAX, "Last")]);

    assert!(result.is_err());
}

#[tokio::test]
async fn exhausted_id_counter_fails_create_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("categories.json");
    let contents = format!(
        r#"{{"version": 1, "next_id": {}, "records": [{{"id": 1, "name": "Design"}}]}}"#,
        u64::MAX
    );
    fs::write(&path, &contents).unwrap();
    let service: JsonFileService<Category> = JsonFileService::open(&path).unwrap();

    let err = service.create(draft("Overflow")).await.unwrap_err();

    assert!(matches!(err, ServiceError::Server(Some(_))));
    assert_eq!(service.list().await.unwrap().len(), 1);
    assert_eq!(fs::read_to_string(&path).unwrap(), contents);
}
