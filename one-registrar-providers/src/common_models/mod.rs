pub mod did;
pub mod job;
pub mod macros;
