pub mod job_search_handlers;
pub mod system_handlers;

pub use job_search_handlers::*;
pub use system_handlers::*;
