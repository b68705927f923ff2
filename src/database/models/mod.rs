pub mod post;
pub mod project;
pub mod user;

pub use post::Post;
pub use project::Project;
pub use user::User;
