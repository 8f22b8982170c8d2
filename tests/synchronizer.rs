//! End-to-end behavior of `ManagedList` against an in-memory service.

mod common;

use common::{admin_role, categories, category_list, editor_role, role_list, MockService};
use coursedesk::app::{ManagedList, ModalRole, SearchKeys};
use coursedesk::domain::{Category, CategoryDraft, CategoryPatch, Resource, RolePatch};
use coursedesk::service::Operation;
use coursedesk::ui::viewmodel::EmptyState;
use coursedesk::{Config, ConsoleError, ServiceError};

fn names<'a>(items: impl IntoIterator<Item = &'a coursedesk::ui::views::CategoryView>) -> Vec<&'a str> {
    items.into_iter().map(|c| c.name.as_str()).collect()
}

#[tokio::test]
async fn alpha_beta_gamma_round_trip() {
    let mut list = category_list(&["Alpha", "Beta"]);
    list.mount().await.unwrap();

    list.set_query("alp");
    assert_eq!(names(list.visible_items()), ["Alpha"]);

    list.open_modal(ModalRole::Add, None);
    list.handle_add(CategoryDraft {
        name: "Gamma".into(),
        description: None,
    })
    .await
    .unwrap();

    let ids: Vec<u64> = list.state().collection.iter().map(|c| c.id).collect();
    assert_eq!(ids, [1, 2, 3]);
    assert!(!list.modal(ModalRole::Add).is_open());
    assert_eq!(list.state().query, "alp");
    assert_eq!(names(list.visible_items()), ["Alpha"]);
}

#[tokio::test]
async fn mount_loads_collection_in_server_order() {
    let mut list = category_list(&["Programming", "Design", "Marketing"]);
    assert!(list.visible_items().is_empty());

    list.mount().await.unwrap();

    assert_eq!(names(list.visible_items()), ["Programming", "Design", "Marketing"]);
    assert!(!list.loading());
    assert_eq!(list.error(), None);
    assert_eq!(list.service().calls(), [Operation::List]);
}

#[tokio::test]
async fn create_appends_server_copy() {
    let mut list = category_list(&["Alpha"]);
    list.mount().await.unwrap();

    list.handle_add(CategoryDraft {
        name: "Design".into(),
        description: Some("Visual work".into()),
    })
    .await
    .unwrap();

    let created = list.state().collection.last().unwrap();
    assert_eq!(created.id, 2);
    assert_eq!(created.description, "Visual work");
    assert_eq!(created.created, "2024-03-15");
    assert_eq!(created.course_count, 0);
}

#[tokio::test]
async fn update_replaces_element_and_closes_edit_modal() {
    let mut list = category_list(&["Alpha", "Beta", "Gamma"]);
    list.mount().await.unwrap();

    let beta = list.state().find(&2).cloned();
    list.open_modal(ModalRole::Edit, beta);
    assert_eq!(list.modal(ModalRole::Edit).selected_item().map(|c| c.id), Some(2));

    list.handle_update(
        2,
        CategoryPatch {
            name: Some("Beta Prime".into()),
            description: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(names(list.visible_items()), ["Alpha", "Beta Prime", "Gamma"]);
    assert!(!list.modal(ModalRole::Edit).is_open());
    assert!(list.modal(ModalRole::Edit).selected_item().is_none());
}

#[tokio::test]
async fn delete_removes_element_and_closes_delete_modal() {
    let mut list = category_list(&["Alpha", "Beta", "Gamma"]);
    list.mount().await.unwrap();

    let gamma = list.state().find(&3).cloned();
    list.open_modal(ModalRole::Delete, gamma);
    list.handle_delete(3).await.unwrap();

    assert_eq!(names(list.visible_items()), ["Alpha", "Beta"]);
    assert!(!list.modal(ModalRole::Delete).is_open());
    assert!(list.service().records().iter().all(|c| c.id != 3));
}

#[tokio::test]
async fn failed_create_keeps_collection_and_add_modal() {
    let mut list = category_list(&["Alpha", "Beta"]);
    list.mount().await.unwrap();
    let before = list.state().collection.clone();

    list.open_modal(ModalRole::Add, None);
    list.service()
        .fail_next(Operation::Create, ServiceError::validation("Name already taken"));

    let err = list
        .handle_add(CategoryDraft {
            name: "Alpha".into(),
            description: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ConsoleError::Mutation(ref m) if m == "Name already taken"));
    assert_eq!(list.state().collection, before);
    assert!(list.modal(ModalRole::Add).is_open());
    assert_eq!(list.error(), Some("Name already taken"));
    assert!(!list.loading());
}

#[tokio::test]
async fn failed_update_keeps_edit_target() {
    let mut list = category_list(&["Alpha"]);
    list.mount().await.unwrap();

    let alpha = list.state().find(&1).cloned();
    list.open_modal(ModalRole::Edit, alpha.clone());
    list.service()
        .fail_next(Operation::Update, ServiceError::Server(None));

    let result = list
        .handle_update(
            1,
            CategoryPatch {
                name: Some("Renamed".into()),
                description: None,
            },
        )
        .await;

    assert!(result.is_err());
    assert_eq!(list.state().find(&1), alpha.as_ref());
    assert!(list.modal(ModalRole::Edit).is_open());
    assert_eq!(list.modal(ModalRole::Edit).selected_item(), alpha.as_ref());
}

#[tokio::test]
async fn failed_delete_keeps_collection_and_delete_modal() {
    let mut list = category_list(&["Alpha", "Beta"]);
    list.mount().await.unwrap();
    let before = list.state().collection.clone();

    let beta = list.state().find(&2).cloned();
    list.open_modal(ModalRole::Delete, beta.clone());
    list.service()
        .fail_next(Operation::Delete, ServiceError::server("Category has courses"));

    let err = list.handle_delete(2).await.unwrap_err();

    assert!(matches!(err, ConsoleError::Mutation(ref m) if m == "Category has courses"));
    assert_eq!(list.state().collection, before);
    assert!(list.modal(ModalRole::Delete).is_open());
    assert_eq!(list.modal(ModalRole::Delete).selected_item(), beta.as_ref());
    assert_eq!(list.error(), Some("Category has courses"));
    assert!(!list.loading());
}

#[tokio::test]
async fn failure_without_message_uses_configured_fallback() {
    let config = Config {
        error_fallback: "Try again later".into(),
        ..Config::default()
    };
    let mut list = ManagedList::new(
        MockService::with_records(categories(&["Alpha"])),
        "Categories",
        "categories",
        SearchKeys::new(["name"]),
        &config,
    );
    list.mount().await.unwrap();
    list.service()
        .fail_next(Operation::Delete, ServiceError::Server(Some("   ".into())));

    let err = list.handle_delete(1).await.unwrap_err();

    assert_eq!(err.to_string(), "Try again later");
    assert_eq!(list.error(), Some("Try again later"));
    assert_eq!(list.visible_items().len(), 1);
}

#[tokio::test]
async fn validation_from_server_rules_surfaces_message() {
    let mut list = category_list(&[]);
    list.mount().await.unwrap();
    list.open_modal(ModalRole::Add, None);

    let err = list.handle_add(CategoryDraft::default()).await.unwrap_err();

    assert_eq!(err.to_string(), "Category name is required");
    assert!(list.visible_items().is_empty());
    assert!(list.modal(ModalRole::Add).is_open());
}

#[tokio::test]
async fn next_request_clears_previous_error() {
    let mut list = category_list(&["Alpha"]);
    list.mount().await.unwrap();
    list.service()
        .fail_next(Operation::Delete, ServiceError::not_found("category 1 not found"));

    assert!(list.handle_delete(1).await.is_err());
    assert_eq!(list.error(), Some("category 1 not found"));

    list.refresh().await.unwrap();
    assert_eq!(list.error(), None);
}

#[tokio::test]
async fn dismiss_error_clears_message() {
    let mut list = category_list(&["Alpha"]);
    list.mount().await.unwrap();
    list.service()
        .fail_next(Operation::Delete, ServiceError::server("boom"));
    let _ = list.handle_delete(1).await;

    list.dismiss_error();

    assert_eq!(list.error(), None);
    assert_eq!(list.compute_viewmodel().error, None);
}

#[tokio::test]
async fn fetch_failure_renders_error_empty_state() {
    let mut list = category_list(&["Alpha"]);
    list.service()
        .fail_next(Operation::List, ServiceError::Fetch(Some("Failed to load categories".into())));

    let err = list.mount().await.unwrap_err();
    assert!(matches!(err, ConsoleError::Fetch(_)));

    let vm = list.compute_viewmodel();
    assert!(vm.rows.is_empty());
    assert!(!vm.loading);
    assert_eq!(vm.empty_state, Some(EmptyState::error("Failed to load categories")));
    assert_eq!(vm.header.title, "Categories (0)");
}

#[tokio::test]
async fn failed_refresh_keeps_loaded_collection() {
    let mut list = category_list(&["Alpha", "Beta"]);
    list.mount().await.unwrap();
    list.service()
        .fail_next(Operation::List, ServiceError::Fetch(None));

    assert!(list.refresh().await.is_err());

    assert_eq!(names(list.visible_items()), ["Alpha", "Beta"]);
    assert_eq!(list.error(), Some(coursedesk::domain::GENERIC_ERROR_MESSAGE));
}

#[tokio::test]
async fn duplicate_ids_in_list_response_keep_first() {
    let service = MockService::with_records(vec![
        Category::new(1, "First"),
        Category::new(2, "Second"),
        Category::new(1, "Repeated"),
    ]);
    let mut list = ManagedList::new(
        service,
        "Categories",
        "categories",
        SearchKeys::new(["name"]),
        &Config::default(),
    );

    list.mount().await.unwrap();

    assert_eq!(names(list.visible_items()), ["First", "Second"]);
}

#[tokio::test]
async fn system_role_edit_is_rejected_without_service_call() {
    let mut list = role_list(vec![admin_role(), editor_role(2)]);
    list.mount().await.unwrap();

    let admin = list.state().find(&1).cloned();
    list.open_modal(ModalRole::Edit, admin);

    let err = list
        .handle_update(
            1,
            RolePatch {
                name: Some("Root".into()),
                ..RolePatch::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ConsoleError::SystemRoleImmutable { ref role } if role == "Administrator"));
    assert_eq!(list.service().calls(), [Operation::List]);
    assert!(list.modal(ModalRole::Edit).is_open());
    assert!(list.error().is_some());
    assert!(!list.loading());
    assert_eq!(list.state().find(&1).map(|r| r.name.as_str()), Some("Administrator"));
}

#[tokio::test]
async fn system_role_delete_is_rejected_without_service_call() {
    let mut list = role_list(vec![admin_role()]);
    list.mount().await.unwrap();

    let result = list.handle_delete(1).await;

    assert!(matches!(result, Err(ConsoleError::SystemRoleImmutable { .. })));
    assert_eq!(list.service().call_count(Operation::Delete), 0);
    assert_eq!(list.visible_items().len(), 1);
}

#[tokio::test]
async fn custom_role_can_be_renamed_and_deleted() {
    let mut list = role_list(vec![admin_role(), editor_role(2)]);
    list.mount().await.unwrap();

    list.handle_update(
        2,
        RolePatch {
            name: Some("Content Editor".into()),
            ..RolePatch::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(list.state().find(&2).map(|r| r.name.as_str()), Some("Content Editor"));

    list.handle_delete(2).await.unwrap();
    assert_eq!(list.visible_items().len(), 1);
}

#[tokio::test]
async fn viewmodel_tracks_query_and_open_modal() {
    let mut list = ManagedList::new(
        MockService::with_records(categories(&["Design", "Data Science", "Marketing"])),
        "Categories",
        "categories",
        SearchKeys::new(["name"]),
        &Config::default(),
    );
    list.mount().await.unwrap();

    list.set_query("DE");
    let design = list.state().find(&1).cloned();
    list.open_modal(ModalRole::View, design);

    let vm = list.compute_viewmodel();
    assert_eq!(vm.header.title, "Categories (1 of 3)");
    assert_eq!(vm.rows[0].item.name, "Design");
    assert_eq!(vm.rows[0].highlight_ranges, vec![(0, 2)]);
    assert_eq!(vm.search_bar.map(|s| s.query), Some("DE".to_string()));
    assert_eq!(vm.open_modal, Some(ModalRole::View));
    assert_eq!(vm.empty_state, None);
}

#[tokio::test]
async fn description_placeholder_is_searched_like_any_text() {
    let mut list = category_list(&["Design", "Data Science", "Marketing"]);
    list.mount().await.unwrap();

    list.set_query("DE");

    let vm = list.compute_viewmodel();
    assert_eq!(vm.header.title, "Categories (3 of 3)");
    assert_eq!(vm.rows[0].matched_field, Some("name"));
    assert_eq!(vm.rows[1].matched_field, Some("description"));
}

#[tokio::test]
async fn empty_collection_shows_no_items_state() {
    let mut list = category_list(&[]);
    list.mount().await.unwrap();

    let vm = list.compute_viewmodel();
    assert_eq!(vm.empty_state, Some(EmptyState::no_items("categories")));
}

#[tokio::test]
async fn records_map_through_display_mapper() {
    let mut list = category_list(&["Alpha"]);
    list.mount().await.unwrap();

    let expected = Category::new(1, "Alpha").to_view();
    assert_eq!(list.visible_items(), [&expected]);
    assert_eq!(expected.description, "No description");
}
