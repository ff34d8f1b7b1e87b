//! Heroes, powers, and the hero powers that link them.
//!
//! - `validation`: field validators and the validated `Strength`/`Description` types.
//! - `models`: persisted rows, insert drafts, and their serialized field sets.
//! - `repo`: SQL access, including transactional create and cascading deletes.
//! - `db`: pool setup and the embedded schema.

pub mod db;
pub mod models;
pub mod repo;
pub mod seed;
pub mod validation;

pub use models::{Hero, HeroDetail, HeroPower, NewHero, NewHeroPower, NewPower, Power};
pub use repo::{HeroPowerError, HeroRepo};
pub use validation::{Description, Strength, ValidationError};
