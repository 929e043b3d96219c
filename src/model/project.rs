use chrono::{DateTime, TimeZone, Utc};
use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::{LabError, Result};

/// Accuracy ceiling a sweep may raise a project to.
pub const MAX_SWEEP_ACCURACY: f64 = 0.99;

/// Category of a learning project.
///
/// Stored as its display label; labels outside the known set are kept
/// verbatim as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProjectType {
    Classification,
    Regression,
    DeepLearning,
    TimeSeries,
    Nlp,
    Clustering,
    Other(String),
}

impl ProjectType {
    pub fn label(&self) -> &str {
        match self {
            ProjectType::Classification => "Classification",
            ProjectType::Regression => "Regression",
            ProjectType::DeepLearning => "Deep Learning",
            ProjectType::TimeSeries => "Time Series",
            ProjectType::Nlp => "NLP",
            ProjectType::Clustering => "Clustering",
            ProjectType::Other(label) => label,
        }
    }

    /// Phosphor glyph shown on the project card.
    pub fn icon(&self) -> &'static str {
        use egui_phosphor::regular as ph;
        match self {
            ProjectType::Classification => ph::TAG,
            ProjectType::Regression => ph::TREND_UP,
            ProjectType::DeepLearning => ph::BRAIN,
            ProjectType::TimeSeries => ph::TIMER,
            ProjectType::Nlp => ph::CHAT_CIRCLE,
            ProjectType::Clustering => ph::MAGNIFYING_GLASS,
            ProjectType::Other(_) => ph::ROBOT,
        }
    }
}

impl From<String> for ProjectType {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Classification" => ProjectType::Classification,
            "Regression" => ProjectType::Regression,
            "Deep Learning" => ProjectType::DeepLearning,
            "Time Series" => ProjectType::TimeSeries,
            "NLP" => ProjectType::Nlp,
            "Clustering" => ProjectType::Clustering,
            _ => ProjectType::Other(label),
        }
    }
}

impl From<ProjectType> for String {
    fn from(kind: ProjectType) -> Self {
        match kind {
            ProjectType::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

/// Training lifecycle of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Draft,
    Training,
    Completed,
}

impl ProjectStatus {
    pub fn label(self) -> &'static str {
        match self {
            ProjectStatus::Draft => "draft",
            ProjectStatus::Training => "training",
            ProjectStatus::Completed => "completed",
        }
    }

    pub fn icon(self) -> &'static str {
        use egui_phosphor::regular as ph;
        match self {
            ProjectStatus::Completed => ph::CHECK_CIRCLE,
            ProjectStatus::Draft | ProjectStatus::Training => ph::ARROWS_CLOCKWISE,
        }
    }

    pub fn color(self) -> Color32 {
        match self {
            ProjectStatus::Completed => Color32::from_rgb(0x7c, 0x98, 0x85), // Sage
            ProjectStatus::Draft | ProjectStatus::Training => Color32::from_rgb(0xc1, 0x78, 0x17), // Amber
        }
    }
}

/// A single tracked learning experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ProjectType,
    pub algorithm: String,
    /// Model accuracy from 0.0 to 1.0.
    pub accuracy: f64,
    pub created: DateTime<Utc>,
    pub status: ProjectStatus,
    pub description: String,
}

impl Project {
    /// A fresh user-created project, waiting for its data upload.
    pub fn new_draft(id: impl Into<String>, name: impl Into<String>, created: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: ProjectType::Classification,
            algorithm: "Random Forest".to_string(),
            accuracy: 0.0,
            created,
            status: ProjectStatus::Draft,
            description: "New project - ready for data upload".to_string(),
        }
    }

    /// Finish training, raising accuracy by `gain`.
    ///
    /// The result never exceeds [`MAX_SWEEP_ACCURACY`] and never falls below
    /// the current accuracy.
    pub fn complete_training(&mut self, gain: f64) {
        let raised = (self.accuracy + gain.max(0.0)).min(MAX_SWEEP_ACCURACY);
        self.accuracy = raised.max(self.accuracy);
        self.status = ProjectStatus::Completed;
    }

    pub fn accuracy_percent(&self) -> f64 {
        self.accuracy * 100.0
    }
}

/// Check a loaded collection before the controller adopts it.
pub fn validate_projects(projects: &[Project]) -> Result<()> {
    let mut seen = std::collections::HashSet::new();
    for project in projects {
        if project.id.trim().is_empty() {
            return Err(LabError::invalid(format!(
                "project '{}' has an empty id",
                project.name
            )));
        }
        if !seen.insert(project.id.as_str()) {
            return Err(LabError::invalid(format!("duplicate project id '{}'", project.id)));
        }
        if !project.accuracy.is_finite() || !(0.0..=1.0).contains(&project.accuracy) {
            return Err(LabError::invalid(format!(
                "project '{}' has accuracy {} outside [0, 1]",
                project.id, project.accuracy
            )));
        }
    }
    Ok(())
}

fn seed_date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// The canonical demo collection used when nothing valid is stored.
pub fn sample_projects() -> Vec<Project> {
    let sample = |id: &str,
                  name: &str,
                  kind: ProjectType,
                  algorithm: &str,
                  accuracy: f64,
                  created: DateTime<Utc>,
                  status: ProjectStatus,
                  description: &str| Project {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        algorithm: algorithm.to_string(),
        accuracy,
        created,
        status,
        description: description.to_string(),
    };

    vec![
        sample(
            "project-1",
            "Iris Classification",
            ProjectType::Classification,
            "Random Forest",
            0.94,
            seed_date(2025, 1, 10),
            ProjectStatus::Completed,
            "Classifying iris flowers based on petal and sepal measurements",
        ),
        sample(
            "project-2",
            "Housing Price Prediction",
            ProjectType::Regression,
            "Linear Regression",
            0.87,
            seed_date(2025, 1, 8),
            ProjectStatus::Completed,
            "Predicting house prices based on various features",
        ),
        sample(
            "project-3",
            "Customer Churn Analysis",
            ProjectType::Classification,
            "Neural Network",
            0.89,
            seed_date(2025, 1, 5),
            ProjectStatus::Training,
            "Predicting customer churn for telecom company",
        ),
        sample(
            "project-4",
            "Image Recognition",
            ProjectType::DeepLearning,
            "CNN",
            0.92,
            seed_date(2025, 1, 3),
            ProjectStatus::Completed,
            "Handwritten digit recognition using convolutional neural networks",
        ),
        sample(
            "project-5",
            "Stock Price Forecasting",
            ProjectType::TimeSeries,
            "LSTM",
            0.78,
            seed_date(2025, 1, 1),
            ProjectStatus::Training,
            "Predicting stock prices using LSTM neural networks",
        ),
        sample(
            "project-6",
            "Sentiment Analysis",
            ProjectType::Nlp,
            "Transformer",
            0.91,
            seed_date(2024, 12, 28),
            ProjectStatus::Completed,
            "Analyzing sentiment in social media posts",
        ),
    ]
}
