//! Request-pipeline middleware: correlation-id injection, request/response
//! logging and the basic-auth gate in front of the documentation routes.

pub mod docs_auth;
pub mod request_id;
pub mod request_log;
