//! Guided tour over fixed UI anchors.

/// One stop of the tour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TutorialStep {
    /// Anchor name the step points at.
    pub target: &'static str,
    pub title: &'static str,
    pub content: &'static str,
}

pub const HERO_ANCHOR: &str = "hero-text";
pub const PROJECTS_ANCHOR: &str = "projects-grid";
pub const PROGRESS_ANCHOR: &str = "learning-progress";
pub const QUICK_ACTIONS_ANCHOR: &str = "quick-actions";

pub fn default_steps() -> Vec<TutorialStep> {
    vec![
        TutorialStep {
            target: HERO_ANCHOR,
            title: "Welcome to AI Learning Lab!",
            content: "Let's take a quick tour of the platform.",
        },
        TutorialStep {
            target: PROJECTS_ANCHOR,
            title: "Your Projects",
            content: "This is where your machine learning projects live. Each card shows your progress and results.",
        },
        TutorialStep {
            target: PROGRESS_ANCHOR,
            title: "Learning Progress",
            content: "Track your ML learning journey and earn achievements as you master new concepts.",
        },
        TutorialStep {
            target: QUICK_ACTIONS_ANCHOR,
            title: "Quick Start",
            content: "Ready to begin? Choose one of these options to start your next project.",
        },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TutorialState {
    Step(usize),
    Done,
}

/// Strictly forward walkthrough. Steps whose anchor is missing are skipped.
#[derive(Debug, Clone)]
pub struct Tutorial {
    steps: Vec<TutorialStep>,
    state: TutorialState,
}

impl Tutorial {
    /// Start at the first step whose anchor is present.
    pub fn start(steps: Vec<TutorialStep>, is_present: impl Fn(&str) -> bool) -> Self {
        let state = Self::next_present(&steps, 0, &is_present);
        Self { steps, state }
    }

    #[cfg(test)]
    pub fn state(&self) -> TutorialState {
        self.state
    }

    pub fn current(&self) -> Option<&TutorialStep> {
        match self.state {
            TutorialState::Step(index) => self.steps.get(index),
            TutorialState::Done => None,
        }
    }

    pub fn is_done(&self) -> bool {
        self.state == TutorialState::Done
    }

    /// Move to the next present step, or to `Done`. Advancing a finished
    /// tour stays `Done`.
    pub fn advance(&mut self, is_present: impl Fn(&str) -> bool) -> TutorialState {
        if let TutorialState::Step(index) = self.state {
            self.state = Self::next_present(&self.steps, index + 1, &is_present);
        }
        self.state
    }

    fn next_present(
        steps: &[TutorialStep],
        from: usize,
        is_present: &impl Fn(&str) -> bool,
    ) -> TutorialState {
        steps
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, step)| is_present(step.target))
            .map(|(index, _)| TutorialState::Step(index))
            .unwrap_or(TutorialState::Done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_present(_: &str) -> bool {
        true
    }

    #[test]
    fn test_walks_every_step_in_order() {
        let mut tour = Tutorial::start(default_steps(), all_present);
        assert_eq!(tour.state(), TutorialState::Step(0));
        assert_eq!(tour.current().map(|s| s.target), Some(HERO_ANCHOR));

        assert_eq!(tour.advance(all_present), TutorialState::Step(1));
        assert_eq!(tour.advance(all_present), TutorialState::Step(2));
        assert_eq!(tour.advance(all_present), TutorialState::Step(3));
        assert_eq!(tour.advance(all_present), TutorialState::Done);
        assert!(tour.current().is_none());
    }

    #[test]
    fn test_skips_missing_anchor() {
        let present = |target: &str| target != PROGRESS_ANCHOR;
        let mut tour = Tutorial::start(default_steps(), present);
        tour.advance(present);
        assert_eq!(tour.current().map(|s| s.target), Some(PROJECTS_ANCHOR));
        tour.advance(present);
        assert_eq!(tour.current().map(|s| s.target), Some(QUICK_ACTIONS_ANCHOR));
        assert_eq!(tour.advance(present), TutorialState::Done);
    }

    #[test]
    fn test_missing_first_anchor_starts_later() {
        let tour = Tutorial::start(default_steps(), |t| t != HERO_ANCHOR);
        assert_eq!(tour.state(), TutorialState::Step(1));
    }

    #[test]
    fn test_no_anchors_is_done_immediately() {
        let mut tour = Tutorial::start(default_steps(), |_| false);
        assert!(tour.is_done());
        assert_eq!(tour.advance(all_present), TutorialState::Done);
    }
}
