//! Integration tests: each test spawns the full router on an ephemeral port
//! over a fresh SQLite file.

mod common;
mod html_tests;
