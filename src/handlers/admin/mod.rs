pub mod posts;
pub mod projects;
