use std::collections::HashMap;
use std::time::Instant;

use tracing::{info, warn};
use uuid::Uuid;

use crate::config::LabSettings;
use crate::controller::{LabController, Navigation, SweepSchedule};
use crate::io::{FileStore, LabStore, MemoryStore};
use crate::model::tutorial::default_steps;
use crate::model::{NotificationCenter, Severity, Tutorial, TutorialState};
use crate::ui;

/// Screen rectangles of named UI regions, as laid out in the last frame.
pub type Anchors = HashMap<&'static str, egui::Rect>;

/// Requests raised while drawing, applied once the frame is laid out.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingAction {
    PromptNewProject,
    CreateProject(String),
    CancelNewProject,
    UploadData,
    OpenProject(String),
    LoadMore,
    ShowAuth,
    HideAuth,
    Authenticate,
    Logout,
    StartTutorial,
    AdvanceTutorial,
    DismissNotification(Uuid),
}

/// Main application state.
pub struct LabApp {
    pub controller: LabController<LabStore>,
    pub settings: LabSettings,
    pub sweep: SweepSchedule,
    pub tutorial: Option<Tutorial>,
    pub anchors: Anchors,

    // Dialog state
    pub show_new_project: bool,
    pub new_project_name: String,
    pub show_about: bool,
    pub auth_email: String,
    pub auth_password: String,

    // Status message
    pub status_message: String,
    pub last_navigation: Option<Navigation>,

    // Pending actions from nested UI closures
    pub pending: Vec<PendingAction>,
}

impl LabApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: LabSettings) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);
        ui::theme::apply_theme(&cc.egui_ctx);

        let store = match FileStore::open(settings.storage_dir()) {
            Ok(store) => {
                info!(dir = %store.dir().display(), "using file storage");
                LabStore::File(store)
            }
            Err(e) => {
                warn!(error = %e, "storage directory unavailable; state will not survive restart");
                LabStore::Memory(MemoryStore::new())
            }
        };
        let notifications = NotificationCenter::new(settings.notification_lifetime());
        let controller = LabController::new(store, notifications, settings.gallery_limit);
        Self::from_parts(settings, controller)
    }

    pub fn from_parts(settings: LabSettings, controller: LabController<LabStore>) -> Self {
        Self {
            sweep: SweepSchedule::new(settings.sweep_interval(), Instant::now()),
            controller,
            settings,
            tutorial: None,
            anchors: Anchors::new(),
            show_new_project: false,
            new_project_name: String::new(),
            show_about: false,
            auth_email: String::new(),
            auth_password: String::new(),
            status_message: "Ready".to_string(),
            last_navigation: None,
            pending: Vec::new(),
        }
    }

    /// Apply everything the UI asked for during this frame, in order.
    pub fn apply_pending(&mut self) {
        for action in std::mem::take(&mut self.pending) {
            match action {
                PendingAction::PromptNewProject => {
                    self.new_project_name.clear();
                    self.show_new_project = true;
                }
                PendingAction::CreateProject(name) => {
                    self.show_new_project = false;
                    if let Some(project) = self.controller.create(&name) {
                        self.status_message = format!("Created '{}'", project.name);
                    }
                }
                PendingAction::CancelNewProject => self.show_new_project = false,
                PendingAction::UploadData => self.navigate(Navigation::DataUpload(None)),
                PendingAction::OpenProject(id) => {
                    if let Some(navigation) = self.controller.open(&id) {
                        self.navigate(navigation);
                    }
                }
                PendingAction::LoadMore => self.controller.load_more(),
                PendingAction::ShowAuth => self.controller.show_auth(),
                PendingAction::HideAuth => self.controller.hide_auth(),
                PendingAction::Authenticate => {
                    self.auth_password.clear();
                    self.controller.authenticate();
                    self.status_message = "Signed in".to_string();
                }
                PendingAction::Logout => {
                    self.controller.logout();
                    self.status_message = "Signed out".to_string();
                }
                PendingAction::StartTutorial => self.start_tutorial(),
                PendingAction::AdvanceTutorial => self.advance_tutorial(),
                PendingAction::DismissNotification(id) => self.controller.dismiss_notification(id),
            }
        }
    }

    /// Run the training sweep if its period has elapsed.
    pub fn poll_sweep(&mut self, now: Instant) {
        if self.sweep.poll(now) {
            let completed = self
                .controller
                .advance_training_statuses(&mut rand::rng());
            if completed > 0 {
                self.status_message = format!("{completed} project(s) finished training");
            }
        }
    }

    // --- Navigation ---

    fn navigate(&mut self, navigation: Navigation) {
        match self.settings.pages_base_url.as_deref() {
            Some(base) => {
                let url = navigation.url(base);
                match open::that(&url) {
                    Ok(()) => info!(%url, "opened page"),
                    Err(e) => {
                        warn!(%url, error = %e, "failed to open page");
                        self.controller
                            .notify(format!("Could not open {url}"), Severity::Error);
                    }
                }
            }
            None => info!(page = %navigation.path(), "navigation requested; no pages base URL configured"),
        }
        self.status_message = format!("→ {}", navigation.path());
        self.last_navigation = Some(navigation);
    }

    // --- Tutorial ---

    fn start_tutorial(&mut self) {
        if self.tutorial.is_some() {
            return;
        }
        let anchors = &self.anchors;
        let tour = Tutorial::start(default_steps(), |target| anchors.contains_key(target));
        if tour.is_done() {
            self.finish_tutorial();
        } else {
            self.tutorial = Some(tour);
        }
    }

    fn advance_tutorial(&mut self) {
        let anchors = &self.anchors;
        let finished = match self.tutorial.as_mut() {
            Some(tour) => tour.advance(|target| anchors.contains_key(target)) == TutorialState::Done,
            None => false,
        };
        if finished {
            self.tutorial = None;
            self.finish_tutorial();
        }
    }

    /// Queue an advance when the current step's anchor left the screen.
    fn skip_missing_tutorial_step(&mut self) {
        let missing = self
            .tutorial
            .as_ref()
            .and_then(Tutorial::current)
            .is_some_and(|step| !self.anchors.contains_key(step.target));
        if missing {
            self.pending.push(PendingAction::AdvanceTutorial);
        }
    }

    fn finish_tutorial(&mut self) {
        self.controller
            .notify("Tutorial completed! Ready to start learning?", Severity::Success);
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let (new_project, upload, escape) = ctx.input(|i| {
            (
                i.modifiers.command && i.key_pressed(egui::Key::N),
                i.modifiers.command && i.key_pressed(egui::Key::U),
                i.key_pressed(egui::Key::Escape),
            )
        });
        if new_project {
            self.pending.push(PendingAction::PromptNewProject);
        }
        if upload {
            self.pending.push(PendingAction::UploadData);
        }
        if escape {
            self.show_new_project = false;
            self.show_about = false;
            self.controller.hide_auth();
        }
    }
}

impl eframe::App for LabApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.controller.tick(now);
        self.poll_sweep(now);

        // Handle keyboard shortcuts outside closures to avoid borrow issues
        self.handle_shortcuts(ctx);

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_DARK)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui::dashboard::show_status_bar(
                    &self.status_message,
                    &self.controller.stats(),
                    self.sweep.next_due().saturating_duration_since(now),
                    ui,
                );
            });

        // Central panel: hero, progress, quick actions, gallery
        let mut anchors = Anchors::new();
        egui::CentralPanel::default()
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_DARK)
                    .inner_margin(egui::Margin::same(20.0)),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui::dashboard::show_dashboard(
                            &self.controller,
                            &mut anchors,
                            &mut self.pending,
                            ui,
                        );
                        ui.add_space(16.0);
                        if let Some(id) =
                            ui::gallery::show_gallery(
                                self.controller.gallery(),
                                self.controller.projects().len(),
                                &mut anchors,
                                ui,
                            )
                        {
                            self.pending.push(PendingAction::OpenProject(id));
                        }
                    });
            });
        self.anchors = anchors;

        // Dialogs
        if self.show_new_project {
            ui::dialogs::show_new_project_dialog(self, ctx);
        }
        if self.controller.is_auth_open() {
            ui::dialogs::show_auth_dialog(self, ctx);
        }
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }

        for id in ui::notifications::show_notifications(self.controller.notifications(), ctx) {
            self.pending.push(PendingAction::DismissNotification(id));
        }

        self.skip_missing_tutorial_step();
        if let Some(step) = self.tutorial.as_ref().and_then(Tutorial::current) {
            if let Some(target) = self.anchors.get(step.target) {
                if ui::tutorial_overlay::show_tutorial_step(step, *target, ctx) {
                    self.pending.push(PendingAction::AdvanceTutorial);
                }
            }
        }

        self.apply_pending();

        // Wake up for the next toast expiry or sweep even without input.
        let wake = self
            .controller
            .notifications()
            .next_deadline()
            .map_or(self.sweep.next_due(), |d| d.min(self.sweep.next_due()));
        ctx.request_repaint_after(wake.saturating_duration_since(Instant::now()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tutorial::{HERO_ANCHOR, PROGRESS_ANCHOR, PROJECTS_ANCHOR, QUICK_ACTIONS_ANCHOR};

    fn test_app() -> LabApp {
        let controller = LabController::new(
            LabStore::Memory(MemoryStore::new()),
            NotificationCenter::default(),
            6,
        );
        LabApp::from_parts(LabSettings::default(), controller)
    }

    fn rect() -> egui::Rect {
        egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(10.0, 10.0))
    }

    #[test]
    fn test_open_unknown_project_does_not_navigate() {
        let mut app = test_app();
        app.pending.push(PendingAction::OpenProject("missing".into()));
        app.apply_pending();
        assert!(app.last_navigation.is_none());
        assert_eq!(app.status_message, "Ready");
    }

    #[test]
    fn test_open_known_project_records_navigation() {
        let mut app = test_app();
        app.pending.push(PendingAction::OpenProject("project-1".into()));
        app.apply_pending();
        assert_eq!(
            app.last_navigation,
            Some(Navigation::Results("project-1".into()))
        );
    }

    #[test]
    fn test_create_from_prompt() {
        let mut app = test_app();
        app.pending.push(PendingAction::PromptNewProject);
        app.apply_pending();
        assert!(app.show_new_project);

        app.pending.push(PendingAction::CreateProject("Test A".into()));
        app.apply_pending();
        assert!(!app.show_new_project);
        assert_eq!(app.controller.projects()[0].name, "Test A");
    }

    #[test]
    fn test_cancelled_prompt_creates_nothing() {
        let mut app = test_app();
        app.pending.push(PendingAction::PromptNewProject);
        app.pending.push(PendingAction::CreateProject(String::new()));
        app.apply_pending();
        assert_eq!(app.controller.projects().len(), 6);
    }

    #[test]
    fn test_tutorial_skips_progress_when_logged_out() {
        let mut app = test_app();
        for anchor in [HERO_ANCHOR, PROJECTS_ANCHOR, QUICK_ACTIONS_ANCHOR] {
            app.anchors.insert(anchor, rect());
        }

        app.pending.push(PendingAction::StartTutorial);
        app.apply_pending();
        assert_eq!(app.tutorial.as_ref().map(Tutorial::state), Some(TutorialState::Step(0)));

        app.pending.push(PendingAction::AdvanceTutorial);
        app.pending.push(PendingAction::AdvanceTutorial);
        app.apply_pending();
        assert_eq!(
            app.tutorial.as_ref().and_then(Tutorial::current).map(|s| s.target),
            Some(QUICK_ACTIONS_ANCHOR)
        );

        app.pending.push(PendingAction::AdvanceTutorial);
        app.apply_pending();
        assert!(app.tutorial.is_none());
        let last = app.controller.notifications().visible().last().unwrap();
        assert_eq!(last.message, "Tutorial completed! Ready to start learning?");
        assert!(!app.anchors.contains_key(PROGRESS_ANCHOR));
    }

    #[test]
    fn test_tutorial_skips_anchor_that_disappears_mid_tour() {
        let mut app = test_app();
        for anchor in [HERO_ANCHOR, PROJECTS_ANCHOR, PROGRESS_ANCHOR, QUICK_ACTIONS_ANCHOR] {
            app.anchors.insert(anchor, rect());
        }
        app.pending.push(PendingAction::StartTutorial);
        app.pending.push(PendingAction::AdvanceTutorial);
        app.pending.push(PendingAction::AdvanceTutorial);
        app.apply_pending();
        assert_eq!(app.tutorial.as_ref().map(Tutorial::state), Some(TutorialState::Step(2)));

        app.anchors.remove(PROGRESS_ANCHOR);
        app.skip_missing_tutorial_step();
        app.apply_pending();
        assert_eq!(
            app.tutorial.as_ref().and_then(Tutorial::current).map(|s| s.target),
            Some(QUICK_ACTIONS_ANCHOR)
        );

        // A present anchor does not advance on its own.
        app.skip_missing_tutorial_step();
        app.apply_pending();
        assert_eq!(app.tutorial.as_ref().map(Tutorial::state), Some(TutorialState::Step(3)));
    }

    #[test]
    fn test_tutorial_start_is_ignored_while_running() {
        let mut app = test_app();
        app.anchors.insert(HERO_ANCHOR, rect());
        app.anchors.insert(PROJECTS_ANCHOR, rect());
        app.pending.push(PendingAction::StartTutorial);
        app.pending.push(PendingAction::AdvanceTutorial);
        app.pending.push(PendingAction::StartTutorial);
        app.apply_pending();
        assert_eq!(app.tutorial.as_ref().map(Tutorial::state), Some(TutorialState::Step(1)));
    }

    #[test]
    fn test_sign_in_closes_dialog() {
        let mut app = test_app();
        app.pending.push(PendingAction::ShowAuth);
        app.apply_pending();
        assert!(app.controller.is_auth_open());

        app.auth_password = "hunter2".into();
        app.pending.push(PendingAction::Authenticate);
        app.apply_pending();
        assert!(!app.controller.is_auth_open());
        assert!(app.auth_password.is_empty());
        assert!(app.controller.user().is_some());
    }

    #[test]
    fn test_poll_sweep_waits_for_period() {
        let mut app = test_app();
        let before = app.controller.projects().to_vec();
        app.poll_sweep(Instant::now());
        assert_eq!(app.controller.projects(), before.as_slice());
    }
}
