//! Browse the history of a single file in a git repository.
//!
//! A [`git::FileHistory`] loads the commits that touched the file, keeps a
//! cursor into them, serves blame for the commit under the cursor and maps
//! line numbers between any two revisions.

pub mod config;
pub mod error;
pub mod git;
pub mod models;
pub mod routes;
