pub mod executor;
pub mod registry;
pub mod schema;

pub use executor::ToolExecutor;
pub use registry::{Tool, ToolRegistry};
pub use schema::{parameters_schema_for, parse_args};
