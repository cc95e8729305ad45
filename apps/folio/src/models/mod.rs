pub mod blog;
pub mod project;
pub mod resume;
pub mod stats;
pub mod user;
