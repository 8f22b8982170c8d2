//! Modal lifecycle state for list screens.
//!
//! Each dialog role (add, edit, view, delete) owns an independent
//! [`ModalState`]. A modal holds at most one target entity: opening it again
//! overwrites the target, and closing it always clears the target.

use std::fmt;

/// Dialog roles on a list screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalRole {
    /// Create form. Never carries a selected item.
    Add,
    /// Edit form for the selected item.
    Edit,
    /// Read-only details of the selected item.
    View,
    /// Delete confirmation for the selected item.
    Delete,
}

impl ModalRole {
    /// All roles in display priority order.
    pub const ALL: [Self; 4] = [Self::Add, Self::Edit, Self::View, Self::Delete];
}

impl fmt::Display for ModalRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Add => "add",
            Self::Edit => "edit",
            Self::View => "view",
            Self::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Open/closed state plus an optional target entity for one dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalState<T> {
    is_open: bool,
    selected_item: Option<T>,
}

impl<T> Default for ModalState<T> {
    fn default() -> Self {
        Self {
            is_open: false,
            selected_item: None,
        }
    }
}

impl<T> ModalState<T> {
    /// Creates a closed modal with no target.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the modal. A supplied item replaces the current target; with no
    /// item the previous target is kept.
    pub fn open(&mut self, item: Option<T>) {
        self.is_open = true;
        if let Some(item) = item {
            self.selected_item = Some(item);
        }
    }

    /// Closes the modal and clears the target.
    pub fn close(&mut self) {
        self.is_open = false;
        self.selected_item = None;
    }

    /// Returns `true` while the modal is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    /// Returns the current target, if any.
    #[must_use]
    pub const fn selected_item(&self) -> Option<&T> {
        self.selected_item.as_ref()
    }
}

/// The four independent modal instances of one screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Modals<T> {
    add: ModalState<T>,
    edit: ModalState<T>,
    view: ModalState<T>,
    delete: ModalState<T>,
}

impl<T> Default for Modals<T> {
    fn default() -> Self {
        Self {
            add: ModalState::new(),
            edit: ModalState::new(),
            view: ModalState::new(),
            delete: ModalState::new(),
        }
    }
}

impl<T> Modals<T> {
    /// Creates four closed modals.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the state of one role.
    #[must_use]
    pub const fn get(&self, role: ModalRole) -> &ModalState<T> {
        match role {
            ModalRole::Add => &self.add,
            ModalRole::Edit => &self.edit,
            ModalRole::View => &self.view,
            ModalRole::Delete => &self.delete,
        }
    }

    fn get_mut(&mut self, role: ModalRole) -> &mut ModalState<T> {
        match role {
            ModalRole::Add => &mut self.add,
            ModalRole::Edit => &mut self.edit,
            ModalRole::View => &mut self.view,
            ModalRole::Delete => &mut self.delete,
        }
    }

    /// Opens one role's modal without touching the others.
    ///
    /// The add role never carries a target, so an item passed with
    /// [`ModalRole::Add`] is dropped.
    pub fn open(&mut self, role: ModalRole, item: Option<T>) {
        let item = if role == ModalRole::Add {
            if item.is_some() {
                tracing::debug!("ignoring selected item for add modal");
            }
            None
        } else {
            item
        };
        self.get_mut(role).open(item);
        tracing::debug!(role = %role, "modal opened");
    }

    /// Closes one role's modal without touching the others.
    pub fn close(&mut self, role: ModalRole) {
        self.get_mut(role).close();
        tracing::debug!(role = %role, "modal closed");
    }

    /// Returns `true` if the role's modal is open.
    #[must_use]
    pub const fn is_open(&self, role: ModalRole) -> bool {
        self.get(role).is_open()
    }

    /// Returns the role's target, if any.
    #[must_use]
    pub const fn selected(&self, role: ModalRole) -> Option<&T> {
        self.get(role).selected_item()
    }

    /// Returns the first open role in add/edit/view/delete order.
    #[must_use]
    pub fn first_open(&self) -> Option<ModalRole> {
        ModalRole::ALL.into_iter().find(|role| self.is_open(*role))
    }
}
