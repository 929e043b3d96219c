pub mod notification;
pub mod project;
pub mod tutorial;
pub mod user;

pub use notification::{NotificationCenter, Severity};
pub use project::{Project, ProjectStatus};
pub use tutorial::{Tutorial, TutorialState, TutorialStep};
pub use user::User;
