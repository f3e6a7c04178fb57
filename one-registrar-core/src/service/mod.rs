pub mod error;
pub mod method_resolver;
pub mod registrar_service;
