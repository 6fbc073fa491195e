//! Input readers for the grouping pipeline

pub mod allowlist;
pub mod correlation;
pub mod crossref;

pub use allowlist::{read_allow_list, AllowList};
pub use correlation::{read_correlation_matrix, CorrelationMatrix};
pub use crossref::{read_crossref, CrossRefTable, Entity};
