pub mod core;
pub mod db;
pub mod export;
pub mod session;

/// Rows shown in the preview table after a fetch.
pub const PREVIEW_LIMIT: usize = 30;

/// Largest result set the export encoder will serialize.
pub const EXPORT_ROW_LIMIT: usize = 20_000;
