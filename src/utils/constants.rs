//! Shared configuration constants for page-builder conversion
//!
//! This module contains default values and class names used throughout the
//! emitters so that every builder receives the same scaffolding.

/// Default Elementor version: 3.18.3
///
/// Written into `_elementor_version` so the editor knows which data schema
/// the widget tree follows. Bump together with the widget settings format.
pub const DEFAULT_ELEMENTOR_VERSION: &str = "3.18.3";

/// Default Divi builder version: 4.16
///
/// Every emitted shortcode carries `_builder_version` with this value.
pub const DEFAULT_DIVI_VERSION: &str = "4.16";

/// Default Divi page layout written into `_et_pb_page_layout`
pub const DEFAULT_DIVI_PAGE_LAYOUT: &str = "et_no_sidebar";

/// Prefix for utility classes stamped on captured blocks during lowering
///
/// Produces `pb-paragraph`, `pb-table`, `pb-list` and `pb-blockquote`.
pub const DEFAULT_UTILITY_CLASS_PREFIX: &str = "pb";

/// Default typography applied to Elementor heading widgets
pub const DEFAULT_HEADING_FONT_FAMILY: &str = "Roboto";
pub const DEFAULT_HEADING_FONT_WEIGHT: &str = "600";

/// Number of hex digits in an Elementor element id (e.g. `3f2a9c1`)
pub const ELEMENTOR_ID_LEN: usize = 7;

/// Number of migrated images remembered by `CachingMigrator`
///
/// Keyed on source URL only; the same hero image is commonly referenced from
/// dozens of generated pages.
pub const DEFAULT_IMAGE_CACHE_CAPACITY: usize = 256;

/// Wrapper tags that are flattened into their parent sequence during lowering
pub const GROUP_TAGS: &[&str] = &[
    "html", "body", "div", "section", "article", "main", "aside", "nav", "header", "footer",
    "figure", "center", "column", "row",
];
