//! Client-side state of the group list view: filters, sort, paging and the
//! current selection. Every method is a pure transition; fetching is left to
//! the caller, which turns the state into a `GroupQuery` and feeds the result
//! back through `apply_page`.

use super::types::{Group, GroupPage, GroupQuery, Sort, SortField, SortOrder};
use std::collections::BTreeSet;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupListState {
    pub groups: Vec<Group>,
    pub total_pages: u32,
    pub total_items: u64,
    pub current_page: u32,
    pub page_size: u32,
    pub search: String,
    pub min_members: Option<u32>,
    pub max_members: Option<u32>,
    pub sort: Sort,
    pub selected: BTreeSet<u64>,
}

impl Default for GroupListState {
    fn default() -> Self {
        let query = GroupQuery::default();
        Self {
            groups: Vec::new(),
            total_pages: 0,
            total_items: 0,
            current_page: query.page,
            page_size: query.size,
            search: query.search,
            min_members: None,
            max_members: None,
            sort: query.sort,
            selected: BTreeSet::new(),
        }
    }
}

impl GroupListState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn query(&self) -> GroupQuery {
        GroupQuery {
            page: self.current_page,
            size: self.page_size,
            search: self.search.clone(),
            sort: self.sort,
            min_members: self.min_members,
            max_members: self.max_members,
        }
    }

    /// Same field flips the direction; another field starts ascending.
    pub fn toggle_sort(&mut self, field: SortField) {
        self.sort = if self.sort.field == field {
            Sort {
                field,
                order: self.sort.order.flipped(),
            }
        } else {
            Sort {
                field,
                order: SortOrder::Asc,
            }
        };
    }

    pub fn set_page(&mut self, page: u32) {
        self.current_page = page.max(1);
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.current_page = 1;
    }

    pub fn set_member_bounds(&mut self, min: Option<u32>, max: Option<u32>) {
        self.min_members = min;
        self.max_members = max;
        self.current_page = 1;
    }

    pub fn toggle_selection(&mut self, id: u64) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    /// Selects every visible row, or clears the selection when all are selected.
    pub fn toggle_select_all(&mut self) {
        if self.all_selected() {
            self.selected.clear();
        } else {
            self.selected = self.groups.iter().map(|group| group.id).collect();
        }
    }

    #[must_use]
    pub fn all_selected(&self) -> bool {
        !self.groups.is_empty() && self.groups.iter().all(|group| self.selected.contains(&group.id))
    }

    #[must_use]
    pub fn selected_ids(&self) -> Vec<u64> {
        self.selected.iter().copied().collect()
    }

    /// Replaces the visible rows; selections that left the page are dropped.
    pub fn apply_page(&mut self, page: GroupPage) {
        self.groups = page.content;
        self.total_pages = page.total_pages;
        self.total_items = page.total_elements;
        let visible: BTreeSet<u64> = self.groups.iter().map(|group| group.id).collect();
        self.selected.retain(|id| visible.contains(id));
    }

    /// Page to show once the current selection is deleted.
    #[must_use]
    pub fn page_after_delete(&self) -> u32 {
        if self.current_page > 1 && self.groups.len() == self.selected.len() {
            self.current_page - 1
        } else {
            self.current_page
        }
    }

    /// Moves to the page computed by `page_after_delete` and clears the selection.
    pub fn finish_delete(&mut self) {
        self.current_page = self.page_after_delete();
        self.selected.clear();
    }
}
