//! Navigation model and page assembly for vdoc.
//!
//! This crate provides:
//! - [`Menu`]: validated menu tree with its [`FolderIndex`]
//! - [`NavigationState`] and [`RouteKind`]: where a request sits in the site
//! - [`SiteUrls`]: the single locale substitution point for generated URLs
//! - breadcrumbs, pagination and side navigation fragments
//! - the search box and client script the page shell loads
//! - [`Site`]: assembles a rendered page with all of the above
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//! use vdoc_config::Config;
//! use vdoc_site::Site;
//!
//! let config = Config::load(None, None)?;
//! let site = Site::new(Arc::new(config));
//! if let Some(state) = site.resolve("/1.0/guide/install.html", "en") {
//!     let page = site.page(&state)?;
//!     println!("{}", page.to_html());
//! }
//! # Ok(())
//! # }
//! ```

mod breadcrumbs;
mod client;
mod error;
mod files;
mod menu;
mod page;
mod pagination;
mod route;
mod sidenav;
mod urls;

pub use breadcrumbs::{Breadcrumb, breadcrumbs, breadcrumbs_html, page_label, title_case};
pub use client::{CLIENT_SCRIPT, CLIENT_SCRIPT_PATH, SEARCH_PATH, client_script_tag, search_box_html};
pub use error::NavigationError;
pub use files::collect_files;
pub use menu::{FolderIndex, Menu, MenuNode, PageMeta, flatten};
pub use page::{Page, PageFragments, Site};
pub use pagination::{PageLink, Pagination, page_pagination, paginate, siblings};
pub use route::{INDEX_PAGE, NavigationState, RouteKind};
pub use sidenav::{
    directory_label, show_anchors, side_nav_html, sidebar_header_html, version_selector_html,
};
pub use urls::{
    MENU_FILE, SiteUrls, html_root, menu_path, relative_url_path, rendered_page_path, source_root,
};
