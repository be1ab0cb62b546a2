use crate::{
    cli::globals::GlobalArgs,
    client::ApiClient,
    groups::{GroupListState, GroupService, SortField, SortOrder},
};
use anyhow::Result;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub command: Command,
}

#[derive(Debug)]
pub enum Command {
    List {
        page: u32,
        size: u32,
        search: Option<String>,
        sort: SortField,
        order: SortOrder,
        min_members: Option<u32>,
        max_members: Option<u32>,
    },
    Create {
        name: String,
    },
    Edit {
        id: u64,
        name: String,
        total_member: Option<u32>,
    },
    Delete {
        ids: Vec<u64>,
    },
}

/// Handle the group actions
/// # Errors
/// Returns an error if validation fails or the API rejects the request.
pub async fn execute(command: Command, client: ApiClient) -> Result<()> {
    let groups = GroupService::new(client);

    match command {
        Command::List {
            page,
            size,
            search,
            sort,
            order,
            min_members,
            max_members,
        } => {
            let mut state = list_state(size, search, min_members, max_members, sort, order);
            state.set_page(page);

            let fetched = groups.list(&state.query()).await?;
            state.apply_page(fetched);
            print_page(&state);
        }
        Command::Create { name } => {
            groups.create(&name).await?;
            println!("Group created successfully");
        }
        Command::Edit {
            id,
            name,
            total_member,
        } => {
            groups.edit(id, &name, total_member).await?;
            println!("Group updated successfully");
        }
        Command::Delete { ids } => {
            groups.delete(&ids).await?;
            println!("{} group(s) deleted successfully", ids.len());
        }
    }

    Ok(())
}

/// Builds the list state the same way the list view does: filters first,
/// then sort toggles from the default `name asc`.
fn list_state(
    size: u32,
    search: Option<String>,
    min_members: Option<u32>,
    max_members: Option<u32>,
    sort: SortField,
    order: SortOrder,
) -> GroupListState {
    let mut state = GroupListState::new();
    state.page_size = size;
    if let Some(search) = search {
        state.set_search(search);
    }
    state.set_member_bounds(min_members, max_members);

    if state.sort.field != sort {
        state.toggle_sort(sort);
    }
    if state.sort.order != order {
        state.toggle_sort(sort);
    }
    state
}

fn print_page(state: &GroupListState) {
    if state.groups.is_empty() {
        println!("No groups found.");
    } else {
        println!("{:>8}  {:<50}  {:>8}", "ID", "NAME", "MEMBERS");
        for group in &state.groups {
            println!(
                "{:>8}  {:<50}  {:>8}",
                group.id, group.name, group.total_member
            );
        }
    }
    println!(
        "Page {} of {} ({} groups)",
        state.current_page, state.total_pages, state.total_items
    );
}
