//! Static navigation of the admin area.

use serde::Serialize;

/// Classes applied to the link matching the current page.
pub const ACTIVE_LINK_CLASSES: &str = "bg-gray-100 text-gray-900";
/// Classes applied to every other link.
pub const INACTIVE_LINK_CLASSES: &str = "text-gray-600 hover:bg-gray-50 hover:text-gray-900";

/// Icon drawn next to a navigation label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NavIcon {
    Home,
    Users,
}

/// One entry of the admin navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
    pub icon: NavIcon,
}

/// Index of the admin area; it never claims nested paths.
pub const ADMIN_ROOT: &str = "/admin/";

pub const ADMIN_NAVIGATION: [NavItem; 2] = [
    NavItem {
        label: "Dashboard",
        href: ADMIN_ROOT,
        icon: NavIcon::Home,
    },
    NavItem {
        label: "Users",
        href: "/admin/users",
        icon: NavIcon::Users,
    },
];

/// Whether a link to `target` is active for the request `path`.
///
/// Exact matches count with or without a trailing slash. Non-root targets
/// also own every path below them.
pub fn is_active(target: &str, path: &str) -> bool {
    let target = target.trim_end_matches('/');
    let path = path.trim_end_matches('/');
    if path == target {
        return true;
    }
    let is_root = target.is_empty() || target == ADMIN_ROOT.trim_end_matches('/');
    !is_root && path.starts_with(&format!("{target}/"))
}

/// Navigation entry prepared for a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
    pub icon: NavIcon,
    pub active: bool,
    pub classes: &'static str,
}

/// Build the navigation for a request path.
pub fn navigation_for(path: &str) -> Vec<NavLink> {
    ADMIN_NAVIGATION
        .iter()
        .map(|item| {
            let active = is_active(item.href, path);
            NavLink {
                label: item.label,
                href: item.href,
                icon: item.icon,
                active,
                classes: if active {
                    ACTIVE_LINK_CLASSES
                } else {
                    INACTIVE_LINK_CLASSES
                },
            }
        })
        .collect()
}
