//! HTTP-level tests against the in-memory backend.

mod helpers;

mod activity_test;
mod archive_test;
mod department_test;
mod file_test;
mod folder_test;
mod health_test;
