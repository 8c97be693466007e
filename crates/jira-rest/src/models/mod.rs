pub mod attachment;
pub mod comment;
pub mod issue;
pub mod project;
pub mod user;

pub use attachment::*;
pub use comment::*;
pub use issue::*;
pub use project::*;
pub use user::*;
