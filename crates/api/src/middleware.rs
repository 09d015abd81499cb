/// Actor identity extraction from request headers
pub mod actor;
/// Domain error to HTTP response mapping
pub mod error_handling;
