//! Wedding planner application shell.
//!
//! Exposes the session store, route guard, loaders and screen controllers
//! so integration tests and the binary entrypoint share them.

pub mod budget_store;
pub mod config;
pub mod error;
pub mod guard;
pub mod loaders;
pub mod navigator;
pub mod notify;
pub mod response;
pub mod router;
pub mod routes;
pub mod screens;
pub mod session;
pub mod state;
