mod dto;
mod parser;
mod types;

pub mod prelude {
    pub use super::dto::{CommerzbankRecord, CommerzbankRow, CommerzbankTransaction, RECORD_LEN};
    pub use super::parser::CommerzbankParser;
    pub use super::types::{DATE_FORMAT, StatementAmount, StatementDate};
}
