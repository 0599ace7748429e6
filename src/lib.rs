pub mod configure;
pub mod logger;
pub mod tracking;

mod simple_kv_storage;
