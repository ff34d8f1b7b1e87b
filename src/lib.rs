//! # Superheroes
//!
//! A small HTTP/JSON service over three related records stored in SQLite:
//!
//! - **Heroes** (`id`, `name`, `super_name`)
//! - **Powers** (`id`, `name`, `description`), where a description must be at
//!   least 20 characters long on every write.
//! - **Hero powers** (`id`, `strength`, `hero_id`, `power_id`), linking a hero to
//!   a power with a strength of `Strong`, `Weak` or `Average`.
//!
//! Deleting a hero or a power deletes its hero powers. Validation happens when a
//! value is constructed (`heroes::validation`), so nothing invalid reaches the
//! store, and the schema repeats both checks as `CHECK` constraints.

pub mod api;
pub mod cli;
pub mod heroes;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
