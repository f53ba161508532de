//! Side navigation fragments: menu list, sidebar header, version selector.

use vdoc_config::AnchorsConfig;
use vdoc_renderer::{Translate, escape_html};

use crate::breadcrumbs::title_case;
use crate::menu::MenuNode;
use crate::route::{NavigationState, RouteKind};
use crate::urls::SiteUrls;

const FOLDER_ICON: &str = r#"<svg class="nav-folder-icon" viewBox="0 0 16 16" width="16" height="16" aria-hidden="true"><path d="M1.75 1A1.75 1.75 0 0 0 0 2.75v10.5C0 14.216.784 15 1.75 15h12.5A1.75 1.75 0 0 0 16 13.25v-8.5A1.75 1.75 0 0 0 14.25 3H7.5a.25.25 0 0 1-.2-.1l-.9-1.2C6.07 1.26 5.55 1 5 1H1.75Z"></path></svg>"#;

/// Whether table-of-contents entries are shown for the current page.
///
/// Requires headings, a menu entry for the page in the shown level, a
/// non-index route, anchors enabled, and (unless `include_index_pages` is
/// set) a page other than the directory index.
#[must_use]
pub fn show_anchors(
    state: &NavigationState,
    heading_count: usize,
    entry_matches: bool,
    anchors: &AnchorsConfig,
) -> bool {
    heading_count > 0
        && entry_matches
        && !state.route.is_index()
        && anchors.enabled
        && (anchors.include_index_pages || !state.is_index_page())
}

/// `guide/deep-dive` becomes `Guide / Deep Dive`.
#[must_use]
pub fn directory_label(directory: &str) -> String {
    directory
        .split('/')
        .filter(|s| !s.is_empty())
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" / ")
}

/// Menu list for the shown level.
///
/// The entry matching the current page is marked active and receives
/// `toc_items` (already rendered `<li>` elements) as a sub-list.
#[must_use]
pub fn side_nav_html(
    entries: &[MenuNode],
    state: &NavigationState,
    urls: &SiteUrls,
    toc_items: Option<&str>,
) -> String {
    let current = state.current_path();
    let folder_class = if state.route == RouteKind::Page && state.is_index_page() {
        "nav-folder-index"
    } else {
        "nav-folder"
    };

    let mut html = String::from("<ul class=\"nav flex-column\">\n");
    for entry in entries {
        let active = entry.matches_path(&current);
        let item_class = if entry.is_folder() {
            format!("nav-item {folder_class}")
        } else {
            "nav-item".to_owned()
        };
        let link_class = if active { "nav-link active" } else { "nav-link" };
        let icon = if entry.is_folder() { FOLDER_ICON } else { "" };

        html.push_str(&format!(
            "<li class=\"{item_class}\"><a class=\"{link_class}\" href=\"{}\">{icon}{}</a>",
            escape_html(&urls.page_url(&state.version, entry.url())),
            escape_html(entry.label())
        ));
        if active && let Some(items) = toc_items.filter(|items| !items.is_empty()) {
            html.push_str("\n<ul class=\"nav-sub\">\n");
            html.push_str(items);
            html.push_str("</ul>\n");
        }
        html.push_str("</li>\n");
    }
    html.push_str("</ul>\n");
    html
}

/// Sidebar heading: the directory label with a link back up, or "Index".
#[must_use]
pub fn sidebar_header_html(state: &NavigationState, urls: &SiteUrls, translator: &dyn Translate) -> String {
    if state.directory.is_empty() {
        return format!(
            "<div class=\"sidebar-header\"><span class=\"sidebar-title\">{}</span></div>\n",
            escape_html(&translator.translate("index", &state.locale))
        );
    }

    let parent = state
        .directory
        .rsplit_once('/')
        .map_or("", |(parent, _)| parent);
    format!(
        "<div class=\"sidebar-header\"><span class=\"sidebar-title\">{}</span><a class=\"sidebar-back\" href=\"{}\">{}</a></div>\n",
        escape_html(&directory_label(&state.directory)),
        escape_html(&urls.directory_index_url(&state.version, parent)),
        escape_html(&translator.translate("back_to_menu", &state.locale))
    )
}

/// `<select>` listing every version with the current one selected.
///
/// Option values are index URLs; the client script navigates on change.
#[must_use]
pub fn version_selector_html(
    versions: &[String],
    current: &str,
    urls: &SiteUrls,
    label: &str,
) -> String {
    let mut html = format!(
        "<select id=\"version-combobox\" class=\"form-select\" data-change=\"navigate\" aria-label=\"{}\">\n",
        escape_html(label)
    );
    for version in versions {
        let selected = if version == current { " selected" } else { "" };
        html.push_str(&format!(
            "<option value=\"{}\"{selected}>{}</option>\n",
            escape_html(&urls.index_url(version)),
            escape_html(version)
        ));
    }
    html.push_str("</select>\n");
    html
}
