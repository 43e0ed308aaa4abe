//! Scenarios against a deployed application and its database.
//!
//! They need `BASE_URL` and `DB_URL` and are skipped by default:
//! `cargo test --test e2e -- --ignored`.

mod confirm;
mod helpers;
mod subscribe;
