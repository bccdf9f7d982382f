pub mod impl_memory;
pub mod impl_sqlite;
pub mod interface;
mod migrations;
