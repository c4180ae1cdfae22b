//! Handler Layer
//!
//! Contains the request dispatcher that decodes wire messages, invokes
//! the service ports and shapes structured responses.

pub mod request_handler;

pub use request_handler::ClientRequestHandler;
