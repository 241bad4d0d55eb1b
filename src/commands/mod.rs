/// Backup command functionality
pub mod backup;
/// Drush pass-through functionality
pub mod drush;
/// Get command functionality
pub mod get;
/// Import command functionality
pub mod import;
/// Sequel Ace launcher functionality
pub mod sequelace;
/// Set command functionality
pub mod set;
/// Database sync functionality
pub mod sync_db;
