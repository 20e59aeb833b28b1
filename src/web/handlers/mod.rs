pub mod account_handlers;
pub mod job_handlers;
pub mod screen_handlers;
pub mod system_handlers;

pub use account_handlers::*;
pub use job_handlers::*;
pub use screen_handlers::*;
pub use system_handlers::*;
