//! Project lifecycle and notification controller.
//!
//! Owns the project collection and the session user. Every mutation is
//! written through to the key/value store in full before it returns, and
//! the gallery view model is rebuilt from the collection afterwards.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use egui::Color32;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::io::{KeyValueStore, PROJECTS_KEY, USER_KEY};
use crate::model::project::{sample_projects, validate_projects};
use crate::model::{NotificationCenter, Project, ProjectStatus, Severity, User};

/// Cards shown when no explicit limit is configured.
pub const DEFAULT_GALLERY_LIMIT: usize = 6;
/// Chance that a training project finishes during one sweep.
pub const COMPLETION_PROBABILITY: f64 = 0.3;
/// Upper bound (exclusive) of the accuracy gained on completion.
pub const MAX_ACCURACY_GAIN: f64 = 0.1;
/// Delay before the "load more" stub reports success.
pub const LOAD_MORE_DELAY: Duration = Duration::from_secs(1);

/// Source of the sweep's random decisions.
pub trait SweepRng {
    /// Whether the current training project completes now.
    fn completes(&mut self) -> bool;
    /// Accuracy gained by a completing project, in `[0, MAX_ACCURACY_GAIN)`.
    fn accuracy_gain(&mut self) -> f64;
}

impl SweepRng for rand::rngs::ThreadRng {
    fn completes(&mut self) -> bool {
        rand::Rng::random_bool(self, COMPLETION_PROBABILITY)
    }

    fn accuracy_gain(&mut self) -> f64 {
        rand::Rng::random_range(self, 0.0..MAX_ACCURACY_GAIN)
    }
}

/// Where opening a project leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Data-upload flow, optionally for a specific project.
    DataUpload(Option<String>),
    /// Results flow for a trained project.
    Results(String),
}

impl Navigation {
    /// Page path with the project query parameter.
    pub fn path(&self) -> String {
        match self {
            Navigation::DataUpload(None) => "dataset.html".to_string(),
            Navigation::DataUpload(Some(id)) => format!("dataset.html?project={id}"),
            Navigation::Results(id) => format!("results.html?project={id}"),
        }
    }

    pub fn url(&self, base: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), self.path())
    }
}

/// Everything a gallery card displays, precomputed from one project.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectCard {
    pub id: String,
    pub name: String,
    pub type_label: String,
    pub type_icon: &'static str,
    pub status: ProjectStatus,
    pub status_icon: &'static str,
    pub status_color: Color32,
    pub created: String,
    pub description: String,
    pub algorithm: String,
    pub accuracy_text: String,
    /// Width of the accuracy bar, 0.0 to 1.0.
    pub progress: f32,
}

impl ProjectCard {
    fn from_project(project: &Project) -> Self {
        Self {
            id: project.id.clone(),
            name: project.name.clone(),
            type_label: project.kind.label().to_string(),
            type_icon: project.kind.icon(),
            status: project.status,
            status_icon: project.status.icon(),
            status_color: project.status.color(),
            created: project.created.format("%b %-d, %Y").to_string(),
            description: project.description.clone(),
            algorithm: project.algorithm.clone(),
            accuracy_text: format!("{:.1}%", project.accuracy_percent()),
            progress: project.accuracy as f32,
        }
    }
}

/// Aggregates for the learning-progress panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabStats {
    pub total: usize,
    pub drafts: usize,
    pub training: usize,
    pub completed: usize,
    /// Mean accuracy over completed projects.
    pub average_accuracy: f64,
}

pub struct LabController<S: KeyValueStore> {
    store: S,
    projects: Vec<Project>,
    user: Option<User>,
    notifications: NotificationCenter,
    gallery: Vec<ProjectCard>,
    gallery_limit: usize,
    auth_open: bool,
}

impl<S: KeyValueStore> LabController<S> {
    /// Load state from `store`, seeding sample projects when nothing usable
    /// is stored.
    pub fn new(store: S, notifications: NotificationCenter, gallery_limit: usize) -> Self {
        let (projects, seeded) = match read_projects(&store) {
            Ok(Some(projects)) => (projects, false),
            Ok(None) => {
                info!("no stored projects; seeding sample data");
                (sample_projects(), true)
            }
            Err(e) => {
                warn!(error = %e, "stored projects unusable; reseeding sample data");
                (sample_projects(), true)
            }
        };
        let user = read_user(&store).unwrap_or_else(|e| {
            warn!(error = %e, "stored user session unusable; starting logged out");
            None
        });

        let mut controller = Self {
            store,
            projects,
            user,
            notifications,
            gallery: Vec::new(),
            gallery_limit,
            auth_open: false,
        };
        if seeded {
            controller.persist_projects();
        }
        controller.render(gallery_limit);
        info!(
            projects = controller.projects.len(),
            logged_in = controller.user.is_some(),
            "lab state loaded"
        );
        controller
    }

    // ── Getters ─────────────────────────────────────────────────

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn gallery(&self) -> &[ProjectCard] {
        &self.gallery
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn is_auth_open(&self) -> bool {
        self.auth_open
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn stats(&self) -> LabStats {
        let count = |status: ProjectStatus| self.projects.iter().filter(|p| p.status == status).count();
        let completed: Vec<f64> = self
            .projects
            .iter()
            .filter(|p| p.status == ProjectStatus::Completed)
            .map(|p| p.accuracy)
            .collect();
        let average_accuracy = if completed.is_empty() {
            0.0
        } else {
            completed.iter().sum::<f64>() / completed.len() as f64
        };
        LabStats {
            total: self.projects.len(),
            drafts: count(ProjectStatus::Draft),
            training: count(ProjectStatus::Training),
            completed: completed.len(),
            average_accuracy,
        }
    }

    // ── Projects ────────────────────────────────────────────────

    /// Create a draft project at the front of the collection.
    ///
    /// A blank name aborts silently.
    pub fn create(&mut self, name: &str) -> Option<Project> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let now = Utc::now();
        let project = Project::new_draft(self.next_id(now), name, now);
        self.projects.insert(0, project.clone());
        self.persist_projects();
        self.render(self.gallery_limit);
        info!(id = %project.id, name = %project.name, "project created");
        self.notify(
            "New project created! Upload your data to get started.",
            Severity::Success,
        );
        Some(project)
    }

    /// Randomly finish training projects. Returns how many completed.
    pub fn advance_training_statuses(&mut self, rng: &mut impl SweepRng) -> usize {
        let mut completed = 0;
        for project in self
            .projects
            .iter_mut()
            .filter(|p| p.status == ProjectStatus::Training)
        {
            if rng.completes() {
                project.complete_training(rng.accuracy_gain());
                completed += 1;
                info!(id = %project.id, accuracy = project.accuracy, "training completed");
            }
        }
        debug!(completed, "training sweep finished");
        self.persist_projects();
        self.render(self.gallery_limit);
        completed
    }

    /// Rebuild the gallery from the first `limit` projects.
    ///
    /// The UI draws from the rebuilt cards through a shared borrow and hands
    /// clicks back as actions, so nothing can call back into this while the
    /// gallery is being drawn.
    pub fn render(&mut self, limit: usize) {
        self.gallery_limit = limit;
        self.gallery = self
            .projects
            .iter()
            .take(limit)
            .map(ProjectCard::from_project)
            .collect();
    }

    /// Resolve where opening `id` should lead. Unknown ids lead nowhere.
    pub fn open(&self, id: &str) -> Option<Navigation> {
        let project = self.projects.iter().find(|p| p.id == id)?;
        Some(match project.status {
            ProjectStatus::Draft => Navigation::DataUpload(Some(project.id.clone())),
            ProjectStatus::Training | ProjectStatus::Completed => {
                Navigation::Results(project.id.clone())
            }
        })
    }

    /// Stub pagination: reports progress, then success, never adds data.
    pub fn load_more(&mut self) {
        let now = Instant::now();
        self.notifications
            .push("Loading more projects...", Severity::Info, now);
        self.notifications
            .schedule("All projects loaded!", Severity::Success, now + LOAD_MORE_DELAY);
    }

    // ── Session ─────────────────────────────────────────────────

    pub fn show_auth(&mut self) {
        self.auth_open = true;
    }

    pub fn hide_auth(&mut self) {
        self.auth_open = false;
    }

    /// Simulated login: always succeeds with the demo account.
    pub fn authenticate(&mut self) {
        let user = User::demo(Utc::now());
        info!(user = %user.id, "signed in");
        self.user = Some(user);
        self.persist_user();
        self.hide_auth();
        self.notify("Welcome back! Ready to learn?", Severity::Success);
    }

    pub fn logout(&mut self) {
        if self.user.take().is_none() {
            return;
        }
        info!("signed out");
        self.persist_user();
        self.notify("You have been signed out.", Severity::Info);
    }

    // ── Notifications ───────────────────────────────────────────

    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        self.notifications.push(message, severity, Instant::now());
    }

    pub fn dismiss_notification(&mut self, id: uuid::Uuid) {
        self.notifications.dismiss(id);
    }

    pub fn tick(&mut self, now: Instant) {
        self.notifications.tick(now);
    }

    // ── Persistence helpers ─────────────────────────────────────

    fn next_id(&self, now: DateTime<Utc>) -> String {
        let mut millis = now.timestamp_millis();
        loop {
            let id = format!("project-{millis}");
            if !self.projects.iter().any(|p| p.id == id) {
                return id;
            }
            millis += 1;
        }
    }

    fn persist_projects(&mut self) {
        let result = serde_json::to_string(&self.projects)
            .map_err(Into::into)
            .and_then(|json| self.store.set(PROJECTS_KEY, &json));
        if let Err(e) = result {
            warn!(error = %e, "failed to save projects");
            self.notify(format!("Could not save projects: {e}"), Severity::Error);
        }
    }

    fn persist_user(&mut self) {
        let result = match &self.user {
            Some(user) => serde_json::to_string(user)
                .map_err(Into::into)
                .and_then(|json| self.store.set(USER_KEY, &json)),
            None => self.store.remove(USER_KEY),
        };
        if let Err(e) = result {
            warn!(error = %e, "failed to save user session");
            self.notify(format!("Could not save session: {e}"), Severity::Error);
        }
    }
}

fn read_projects(store: &impl KeyValueStore) -> Result<Option<Vec<Project>>> {
    let Some(raw) = store.get(PROJECTS_KEY)? else {
        return Ok(None);
    };
    let projects: Vec<Project> = serde_json::from_str(&raw)?;
    validate_projects(&projects)?;
    Ok(Some(projects))
}

fn read_user(store: &impl KeyValueStore) -> Result<Option<User>> {
    match store.get(USER_KEY)? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(None),
    }
}

/// Fixed-period timer for the training sweep.
#[derive(Debug, Clone)]
pub struct SweepSchedule {
    period: Duration,
    next_due: Instant,
}

impl SweepSchedule {
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next_due: now + period,
        }
    }

    /// True once per elapsed period. A long stall fires once, not in a burst.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due += self.period;
        if self.next_due <= now {
            self.next_due = now + self.period;
        }
        true
    }

    pub fn next_due(&self) -> Instant {
        self.next_due
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LabError;
    use crate::io::{FileStore, MemoryStore};
    use crate::model::project::ProjectType;
    use tempfile::tempdir;

    /// Completes on the listed call numbers (1-based) with a fixed gain.
    struct ScriptedRng {
        calls: usize,
        succeed_on: Vec<usize>,
        gain: f64,
    }

    impl ScriptedRng {
        fn never() -> Self {
            Self { calls: 0, succeed_on: Vec::new(), gain: 0.0 }
        }
    }

    impl SweepRng for ScriptedRng {
        fn completes(&mut self) -> bool {
            self.calls += 1;
            self.succeed_on.contains(&self.calls)
        }

        fn accuracy_gain(&mut self) -> f64 {
            self.gain
        }
    }

    fn seeded() -> LabController<MemoryStore> {
        LabController::new(MemoryStore::new(), NotificationCenter::default(), DEFAULT_GALLERY_LIMIT)
    }

    fn with_stored(raw: &str) -> LabController<MemoryStore> {
        let mut store = MemoryStore::new();
        store.set(PROJECTS_KEY, raw).unwrap();
        LabController::new(store, NotificationCenter::default(), DEFAULT_GALLERY_LIMIT)
    }

    #[test]
    fn test_empty_store_seeds_and_writes_through() {
        let lab = seeded();
        assert_eq!(lab.projects(), sample_projects().as_slice());
        let raw = lab.store().get(PROJECTS_KEY).unwrap().unwrap();
        let stored: Vec<Project> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored, sample_projects());
        assert!(lab.user().is_none());
    }

    #[test]
    fn test_invalid_stored_projects_reseed() {
        for raw in [
            "not json at all",
            r#"{"projects": []}"#,
            r#"[{"id": "x", "name": "missing fields"}]"#,
        ] {
            let lab = with_stored(raw);
            assert_eq!(lab.projects(), sample_projects().as_slice(), "input: {raw}");
        }
    }

    #[test]
    fn test_duplicate_ids_in_store_reseed() {
        let mut projects = sample_projects();
        projects[5].id = "project-1".into();
        let lab = with_stored(&serde_json::to_string(&projects).unwrap());
        assert_eq!(lab.projects().len(), 6);
        assert_eq!(lab.projects()[5].id, "project-6");
    }

    #[test]
    fn test_create_prepends_draft() {
        let mut lab = seeded();
        let created = lab.create("Test A").unwrap();

        assert_eq!(lab.projects().len(), 7);
        let first = &lab.projects()[0];
        assert_eq!(first, &created);
        assert_eq!(first.name, "Test A");
        assert_eq!(first.status, ProjectStatus::Draft);
        assert_eq!(first.accuracy, 0.0);
        assert!(first.id.starts_with("project-"));
        assert_eq!(lab.gallery()[0].name, "Test A");
        assert_eq!(lab.gallery().len(), DEFAULT_GALLERY_LIMIT);
        assert_eq!(lab.notifications().visible().len(), 1);
    }

    #[test]
    fn test_create_with_blank_name_is_noop() {
        let mut lab = seeded();
        assert!(lab.create("").is_none());
        assert!(lab.create("   ").is_none());
        assert_eq!(lab.projects().len(), 6);
        assert!(lab.notifications().visible().is_empty());
    }

    #[test]
    fn test_rapid_creates_get_unique_ids() {
        let mut lab = seeded();
        let a = lab.create("A").unwrap();
        let b = lab.create("B").unwrap();
        let c = lab.create("C").unwrap();
        assert_ne!(a.id, b.id);
        assert_ne!(b.id, c.id);
        assert_ne!(a.id, c.id);
        assert!(validate_projects(lab.projects()).is_ok());
    }

    #[test]
    fn test_created_project_survives_reload() {
        let temp = tempdir().unwrap();
        let store = FileStore::open(temp.path()).unwrap();
        let mut lab = LabController::new(store, NotificationCenter::default(), 6);
        lab.create("Persisted").unwrap();
        let before = lab.projects().to_vec();

        let reopened = LabController::new(
            FileStore::open(temp.path()).unwrap(),
            NotificationCenter::default(),
            6,
        );
        assert_eq!(reopened.projects(), before.as_slice());
    }

    #[test]
    fn test_stored_collection_round_trips_in_order() {
        let mut projects = sample_projects();
        projects.reverse();
        projects[0].kind = ProjectType::Other("Reinforcement".into());
        let lab = with_stored(&serde_json::to_string(&projects).unwrap());
        assert_eq!(lab.projects(), projects.as_slice());
    }

    #[test]
    fn test_sweep_forced_once_completes_exactly_once() {
        let mut projects = sample_projects();
        projects.retain(|p| p.id == "project-5");
        let mut lab = with_stored(&serde_json::to_string(&projects).unwrap());
        let mut rng = ScriptedRng { calls: 0, succeed_on: vec![7], gain: 0.05 };

        let transitions: usize = (0..50).map(|_| lab.advance_training_statuses(&mut rng)).sum();

        assert_eq!(transitions, 1);
        let project = &lab.projects()[0];
        assert_eq!(project.status, ProjectStatus::Completed);
        assert!((0.78..=0.99).contains(&project.accuracy));
        // Completed projects are no longer consulted.
        assert_eq!(rng.calls, 7);
    }

    #[test]
    fn test_sweeps_keep_training_accuracy_bounded() {
        let mut lab = seeded();
        let mut rng = rand::rng();
        let before: Vec<f64> = lab.projects().iter().map(|p| p.accuracy).collect();

        for _ in 0..200 {
            lab.advance_training_statuses(&mut rng);
        }

        for (project, old) in lab.projects().iter().zip(before) {
            assert!(project.accuracy >= old);
            assert!(project.accuracy <= 0.99 || project.accuracy == old);
            assert_ne!(project.status, ProjectStatus::Training);
        }
    }

    #[test]
    fn test_sweep_without_transitions_still_persists() {
        let mut lab = seeded();
        lab.store.set(PROJECTS_KEY, "[]").unwrap();
        assert_eq!(lab.advance_training_statuses(&mut ScriptedRng::never()), 0);
        let raw = lab.store().get(PROJECTS_KEY).unwrap().unwrap();
        assert_ne!(raw, "[]");
    }

    #[test]
    fn test_sweep_leaves_drafts_alone() {
        let mut lab = seeded();
        lab.create("Draft").unwrap();
        let mut rng = ScriptedRng { calls: 0, succeed_on: (1..100).collect(), gain: 0.05 };
        lab.advance_training_statuses(&mut rng);
        assert_eq!(lab.projects()[0].status, ProjectStatus::Draft);
        assert_eq!(lab.stats().training, 0);
        assert_eq!(lab.stats().drafts, 1);
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut lab = seeded();
        lab.render(4);
        let first = lab.gallery().to_vec();
        lab.render(4);
        assert_eq!(lab.gallery(), first.as_slice());
        assert_eq!(first.len(), 4);
        assert_eq!(first[0].id, "project-1");
        assert_eq!(first[0].accuracy_text, "94.0%");
        assert_eq!(first[0].created, "Jan 10, 2025");
        assert_eq!(first[2].status_icon, ProjectStatus::Training.icon());
    }

    #[test]
    fn test_open_routes_by_status() {
        let mut lab = seeded();
        let draft = lab.create("New").unwrap();

        assert_eq!(
            lab.open(&draft.id),
            Some(Navigation::DataUpload(Some(draft.id.clone())))
        );
        assert_eq!(
            lab.open("project-3"),
            Some(Navigation::Results("project-3".into()))
        );
        assert_eq!(lab.open("no-such-project"), None);
    }

    #[test]
    fn test_navigation_urls() {
        assert_eq!(Navigation::DataUpload(None).path(), "dataset.html");
        assert_eq!(
            Navigation::Results("project-2".into()).url("https://lab.example.com/"),
            "https://lab.example.com/results.html?project=project-2"
        );
    }

    #[test]
    fn test_authenticate_and_logout() {
        let mut lab = seeded();
        lab.show_auth();
        lab.authenticate();

        assert!(!lab.is_auth_open());
        assert_eq!(lab.user().map(|u| u.id.as_str()), Some("user-123"));
        let raw = lab.store().get(USER_KEY).unwrap().unwrap();
        let stored: User = serde_json::from_str(&raw).unwrap();
        assert_eq!(Some(&stored), lab.user());
        assert_eq!(lab.notifications().visible()[0].severity, Severity::Success);

        lab.logout();
        assert!(lab.user().is_none());
        assert!(lab.store().get(USER_KEY).unwrap().is_none());
    }

    #[test]
    fn test_stored_user_is_restored() {
        let mut store = MemoryStore::new();
        let user = User::demo(Utc::now());
        store.set(USER_KEY, &serde_json::to_string(&user).unwrap()).unwrap();
        let lab = LabController::new(store, NotificationCenter::default(), 6);
        assert_eq!(lab.user(), Some(&user));
    }

    #[test]
    fn test_malformed_user_means_logged_out() {
        let mut store = MemoryStore::new();
        store.set(USER_KEY, "{broken").unwrap();
        let lab = LabController::new(store, NotificationCenter::default(), 6);
        assert!(lab.user().is_none());
    }

    #[test]
    fn test_load_more_never_adds_projects() {
        let mut lab = seeded();
        lab.load_more();
        assert_eq!(lab.projects().len(), 6);
        assert_eq!(lab.notifications().visible().len(), 1);
        lab.tick(Instant::now() + LOAD_MORE_DELAY);
        let messages: Vec<_> = lab
            .notifications()
            .visible()
            .iter()
            .map(|n| n.message.as_str())
            .collect();
        assert!(messages.contains(&"All projects loaded!"));
    }

    #[test]
    fn test_write_failure_becomes_error_toast() {
        struct ReadOnly;
        impl KeyValueStore for ReadOnly {
            fn get(&self, _: &str) -> Result<Option<String>> {
                Ok(None)
            }
            fn set(&mut self, _: &str, _: &str) -> Result<()> {
                Err(LabError::invalid("read-only"))
            }
            fn remove(&mut self, _: &str) -> Result<()> {
                Err(LabError::invalid("read-only"))
            }
        }

        let mut lab = LabController::new(ReadOnly, NotificationCenter::default(), 6);
        assert_eq!(lab.notifications().visible()[0].severity, Severity::Error);
        assert!(lab.create("Still in memory").is_some());
        assert_eq!(lab.projects().len(), 7);
    }

    #[test]
    fn test_sweep_schedule_fixed_period() {
        let start = Instant::now();
        let period = Duration::from_secs(30);
        let mut schedule = SweepSchedule::new(period, start);

        assert!(!schedule.poll(start + Duration::from_secs(29)));
        assert!(schedule.poll(start + period));
        assert!(!schedule.poll(start + period));
        assert_eq!(schedule.next_due(), start + period * 2);

        // A long stall fires once and re-anchors.
        let late = start + Duration::from_secs(600);
        assert!(schedule.poll(late));
        assert!(!schedule.poll(late + Duration::from_secs(1)));
        assert_eq!(schedule.next_due(), late + period);
    }
}
