//! SQL where-clause generation.
//!
//! ```text
//! FormState ──▶ normalize ──▶ format_value ──▶ WhereClause::push_predicate
//!                                   ▲
//!                       FieldMetadata (SQL type)
//! ```
//!
//! String literals are emitted as-is between single quotes; embedded quotes
//! are not escaped. Values are expected to come from a trusted form.

mod clause;
mod format;
mod generate;
mod operator;

pub use clause::{append_to_where, WhereClause, EMPTY_WHERE};
pub use format::{format_date, format_date_range, format_number_range, format_value};
pub use generate::generate;
pub use operator::Operator;
