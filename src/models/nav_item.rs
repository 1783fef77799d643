//! Role-driven navigation and filter visibility.
//!
//! Visibility is declared as data: each item carries the roles allowed to
//! see it, and changing who sees what is an edit to these tables, not a
//! code change.

use crate::models::role::Role;

#[derive(Debug)]
pub struct NavItem {
    pub label: &'static str,
    pub url: &'static str,
    pub roles: &'static [Role],
}

pub const NAV_ITEMS: &[NavItem] = &[
    NavItem {
        label: "Dashboard",
        url: "/dashboard",
        roles: &Role::ALL,
    },
    NavItem {
        label: "Calendar",
        url: "/calendar",
        roles: &Role::ALL,
    },
    NavItem {
        label: "Reports",
        url: "/reports",
        roles: &Role::ALL,
    },
    NavItem {
        label: "User Management",
        url: "/users",
        roles: &[Role::Manager],
    },
    NavItem {
        label: "Pentests",
        url: "/pentests",
        roles: &[Role::Ces, Role::Manager],
    },
];

/// The ordered subsequence of [`NAV_ITEMS`] visible to `role`.
pub fn visible_nav_items(role: Role) -> Vec<&'static NavItem> {
    NAV_ITEMS
        .iter()
        .filter(|item| item.roles.contains(&role))
        .collect()
}

/// Dashboard filter affordances per role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    PentesterSelect,
    StatusSelect,
    DateRange,
}

pub fn visible_filters(role: Role) -> &'static [FilterKind] {
    match role {
        Role::Pentester => &[],
        Role::Ces => &[FilterKind::PentesterSelect, FilterKind::StatusSelect],
        Role::Manager => &[FilterKind::DateRange],
    }
}

/// A rendered sidebar link.
#[derive(Debug, Clone)]
pub struct NavLink {
    pub label: &'static str,
    pub url: &'static str,
    pub is_active: bool,
}

/// Build the sidebar for `role`. Longest-prefix match: only the most
/// specific item matching the current path is marked active.
pub fn nav_links(role: Role, current_path: &str) -> Vec<NavLink> {
    let visible = visible_nav_items(role);
    let best_match_len = visible
        .iter()
        .filter(|item| current_path.starts_with(item.url))
        .map(|item| item.url.len())
        .max()
        .unwrap_or(0);

    visible
        .into_iter()
        .map(|item| NavLink {
            label: item.label,
            url: item.url,
            is_active: best_match_len > 0
                && item.url.len() == best_match_len
                && current_path.starts_with(item.url),
        })
        .collect()
}
