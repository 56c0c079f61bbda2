//! Stats provider integration: HTTP wrappers, wire types, tabular result
//! sets, and the static team directory.

pub mod http;
pub mod table;
pub mod teams;
pub mod types;

pub use http::{MeasureType, StatsClient};
pub use table::{parse_minutes, Column, ResultTable};
pub use types::StatsResponse;
