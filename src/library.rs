pub mod logger;
pub mod panic;
