pub mod contacts;
pub mod documents;
pub mod send;
