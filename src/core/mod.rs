//! # Core Application Logic
//!
//! This module contains the CRM's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • query pipeline       │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │   Store    │      │    Web     │
//!     │  Adapter   │      │ (simulated │      │  (future)  │
//!     │ (ratatui)  │      │  latency)  │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and `update()`, the view-state coordinator
//! - [`query`]: Filter / sort / paginate the customer list
//! - [`validation`]: Customer form rules
//! - [`view`]: Which CRUD view is active
//! - [`config`]: Layered settings (`~/.crm/config.toml`, env, CLI)

pub mod action;
pub mod config;
pub mod format;
pub mod ids;
pub mod insights;
pub mod model;
pub mod query;
pub mod seed;
pub mod state;
pub mod validation;
pub mod view;
