pub mod dashboard;
pub mod dialogs;
pub mod gallery;
pub mod notifications;
pub mod theme;
pub mod toolbar;
pub mod tutorial_overlay;
