// src/constants.rs
//! Domain constants that define the operational boundaries of the system.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// How many objects the Notion API returns per page of results (its maximum).
pub const NOTION_API_PAGE_SIZE: usize = 100;

/// API version that exposes databases through data sources.
pub const NOTION_API_VERSION: &str = "2025-09-03";

pub const NOTION_API_BASE_URL: &str = "https://api.notion.com/v1";

/// Transient-failure retries the HTTP client performs per request.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

// ---------------------------------------------------------------------------
// Traversal boundaries
// ---------------------------------------------------------------------------

/// How many resource hops the traversal follows unless told otherwise.
pub const DEFAULT_TRAVERSAL_DEPTH: u8 = 1;

// ---------------------------------------------------------------------------
// Output layout
// ---------------------------------------------------------------------------

/// Spaces per nesting level in assembled Markdown.
pub const INDENT_SPACES: usize = 4;

/// File name of the CSV table inside a database's directory.
pub const DATABASE_INDEX_FILE: &str = "_index.csv";

/// Longest file or directory name the sanitizer produces.
pub const MAX_FILENAME_LENGTH: usize = 100;

/// Replacement name for titles that sanitize to nothing.
pub const UNTITLED_FILENAME: &str = "untitled";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
