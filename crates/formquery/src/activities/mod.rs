//! Workflow activities.
//!
//! Each activity validates its inputs up front and fails with
//! [`QueryError::MissingRequiredInput`](crate::diagnostic::QueryError) before
//! doing any work.
//!
//! | Activity | Does |
//! |---|---|
//! | [`GenerateWhereClause`] | builds the where clause from a filled-in query form |
//! | [`GetLayerCodedValues`] | resolves the coded values that apply to a field |
//! | [`AddQueryElements`] | adds the query inputs to a form and populates their choices |

mod add_query_elements;
mod generate_where_clause;
mod get_layer_coded_values;

pub use add_query_elements::{AddQueryElements, AddQueryElementsInputs, QUERY_SECTION};
pub use generate_where_clause::{GenerateWhereClause, GenerateWhereClauseInputs};
pub use get_layer_coded_values::{GetLayerCodedValues, GetLayerCodedValuesInputs};
