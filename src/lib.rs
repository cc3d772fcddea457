//! bookbin: a CRUD backend for book records and uploaded files.
//!
//! Books live in SQLite; file content goes to S3-compatible object storage
//! (one public and one private bucket) with only metadata kept locally.
//! Every failure is classified once at its origin and translated to an HTTP
//! response in a single place; every log line carries the request's
//! correlation id.

pub mod config;
pub mod db;
pub mod domain;
pub mod dto;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod pagination;
pub mod repository;
pub mod routes;
pub mod state;
pub mod storage;
pub mod usecase;

#[cfg(test)]
mod tests;
