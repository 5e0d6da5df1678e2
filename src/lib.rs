//! # Seatsweep
//!
//! Audits a directory of accounts for high-cost license seats held by
//! inactive users and reports the reclaim candidates as a console table and
//! a dated CSV file.
//!
//! ## Usage
//!
//! ```bash
//! seatsweep [--days 90] [--sku SPE_E5]... [-v]
//! ```
//!
//! ## Modules
//!
//! - `config` - Audit parameters and directory credentials
//! - `directory` - Authenticated read-only directory client
//! - `audit` - Pure candidate filter over the account snapshot
//! - `report` - Console table and CSV report rendering
//! - `run` - Single-run orchestration and session lifecycle
pub mod audit;
pub mod config;
pub mod directory;
pub mod error;
pub mod report;
pub mod run;

pub use run::run;
