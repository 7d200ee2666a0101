pub mod case;
pub mod config;
pub mod ids;
pub mod report;

pub use case::*;
pub use config::*;
pub use ids::{CaseId, SuiteId};
pub use report::*;
