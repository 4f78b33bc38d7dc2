//! Convert Commerzbank statement exports into transactions ready for YNAB.
//!
//! Each row's narration is split into a payee and a memo using a table of
//! known payees, a corporate-suffix heuristic and a fixed payee for bank fees.
//!
//! ```rust,ignore
//! use ynab_statement_rs::{ParserBuilder, write_ynab_csv};
//!
//! let report = ParserBuilder::new()
//!     .filename("umsaetze.csv")
//!     .payees_file("known_payees.json")
//!     .parse()?;
//!
//! write_ynab_csv(std::io::stdout(), &report.transactions)?;
//! ```

mod builder;
mod config;
mod export;
mod types;

pub mod errors;
pub mod parsers;
pub mod payee;

pub use builder::{Diagnostic, ImportReport, ParserBuilder, RejectedRecord};
pub use config::{ImportConfig, RegistryPolicy};
pub use export::{YNAB_DATE_FORMAT, format_amount, write_ynab_csv};
pub use parsers::prelude::*;
pub use payee::{ExtractionResult, PayeeExtractor, PayeeRegistry};
pub use types::{Currency, Transaction, TransactionCategory};
