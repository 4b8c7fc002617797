pub mod config;
pub mod database;
pub mod documents;
pub mod handlers;
pub mod mail;
pub mod pipeline;
pub mod salutation;

pub use database::Database;
