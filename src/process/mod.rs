//! HTTP boundary for template processing: multipart parsing, request
//! validation, and the processing/health handlers.

pub mod handlers;
pub mod models;
pub mod multipart_parser;
