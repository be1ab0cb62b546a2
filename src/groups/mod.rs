//! Group management: the list/create/edit/delete service and the state of the
//! paginated group list.

pub mod client;
pub mod state;
pub mod types;

pub use client::GroupService;
pub use state::GroupListState;
pub use types::{Group, GroupPage, GroupQuery, Sort, SortField, SortOrder};
