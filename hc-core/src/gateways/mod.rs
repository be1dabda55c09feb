pub mod email;
pub mod kv;
pub mod notify;
pub mod object_store;
