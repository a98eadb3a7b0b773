pub mod memory;
pub mod models;
pub mod notifier;
pub mod pg_store;
pub mod seed;
