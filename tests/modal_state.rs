//! Modal lifecycle: single target, independent roles.

use coursedesk::app::{ModalRole, ModalState, Modals};

#[test]
fn starts_closed_without_target() {
    let modal: ModalState<u32> = ModalState::new();

    assert!(!modal.is_open());
    assert_eq!(modal.selected_item(), None);
}

#[test]
fn second_open_overwrites_target() {
    let mut modal = ModalState::new();
    modal.open(Some("a"));
    modal.open(Some("b"));

    assert!(modal.is_open());
    assert_eq!(modal.selected_item(), Some(&"b"));
}

#[test]
fn open_without_item_keeps_previous_target() {
    let mut modal = ModalState::new();
    modal.open(Some(7));
    modal.open(None);

    assert!(modal.is_open());
    assert_eq!(modal.selected_item(), Some(&7));
}

#[test]
fn close_always_clears_target() {
    let mut modal = ModalState::new();
    modal.open(Some(7));
    modal.close();

    assert!(!modal.is_open());
    assert_eq!(modal.selected_item(), None);

    modal.open(None);
    assert_eq!(modal.selected_item(), None);
}

#[test]
fn roles_are_independent() {
    let mut modals = Modals::new();
    modals.open(ModalRole::Edit, Some("edit-target"));
    modals.open(ModalRole::Delete, Some("delete-target"));

    modals.close(ModalRole::Edit);

    assert!(!modals.is_open(ModalRole::Edit));
    assert!(modals.is_open(ModalRole::Delete));
    assert_eq!(modals.selected(ModalRole::Delete), Some(&"delete-target"));
    assert!(!modals.is_open(ModalRole::Add));
    assert!(!modals.is_open(ModalRole::View));
}

#[test]
fn add_role_never_carries_an_item() {
    let mut modals = Modals::new();
    modals.open(ModalRole::Add, Some(1));

    assert!(modals.is_open(ModalRole::Add));
    assert_eq!(modals.selected(ModalRole::Add), None);
}

#[test]
fn first_open_follows_role_order() {
    let mut modals: Modals<u8> = Modals::new();
    assert_eq!(modals.first_open(), None);

    modals.open(ModalRole::Delete, Some(1));
    modals.open(ModalRole::View, Some(2));
    assert_eq!(modals.first_open(), Some(ModalRole::View));

    modals.close(ModalRole::View);
    assert_eq!(modals.first_open(), Some(ModalRole::Delete));
}
