use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Group {
    pub id: u64,
    pub name: String,
    pub total_member: u32,
}

/// One page of the group list. Missing fields default to empty/zero.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupPage {
    pub content: Vec<Group>,
    pub total_pages: u32,
    pub total_elements: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
    Name,
    TotalMember,
}

impl SortField {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::TotalMember => "totalMember",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "name" => Some(Self::Name),
            "totalMember" | "total-member" | "members" => Some(Self::TotalMember),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub order: SortOrder,
}

impl fmt::Display for Sort {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{},{}", self.field.as_str(), self.order.as_str())
    }
}

/// Filters and paging for `GET /groups`. Pages are 1-based.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupQuery {
    pub page: u32,
    pub size: u32,
    pub search: String,
    pub sort: Sort,
    pub min_members: Option<u32>,
    pub max_members: Option<u32>,
}

impl Default for GroupQuery {
    fn default() -> Self {
        Self {
            page: 1,
            size: DEFAULT_PAGE_SIZE,
            search: String::new(),
            sort: Sort::default(),
            min_members: None,
            max_members: None,
        }
    }
}

impl GroupQuery {
    /// Query-string pairs; a zero or missing member bound is left out.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.max(1).to_string()),
            ("size", self.size.to_string()),
        ];
        let search = self.search.trim();
        if !search.is_empty() {
            pairs.push(("search", search.to_string()));
        }
        pairs.push(("sort", self.sort.to_string()));
        if let Some(min) = self.min_members.filter(|min| *min > 0) {
            pairs.push(("minTotalMember", min.to_string()));
        }
        if let Some(max) = self.max_members.filter(|max| *max > 0) {
            pairs.push(("maxTotalMember", max.to_string()));
        }
        pairs
    }
}

#[derive(Serialize)]
pub(crate) struct CreateGroupRequest<'a> {
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditGroupRequest<'a> {
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_member: Option<u32>,
}
