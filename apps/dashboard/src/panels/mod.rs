//! Page view-models.
//!
//! Each panel pulls from one or more hooks or clients and assembles the JSON
//! a page renders. Panels backed by sample data say so in `source`.

use serde::Serialize;

pub mod interviews;
pub mod job_descriptions;
pub mod overview;
pub mod people;
pub mod placeholders;
pub mod resumes;
pub mod search;

pub use interviews::InterviewBoard;
pub use job_descriptions::JobDescriptionPanel;
pub use overview::OverviewPanel;
pub use people::PeoplePanel;
pub use resumes::ResumePanel;
pub use search::SearchPanel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Live,
    Placeholder,
}

/// A panel's items together with where they came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sourced<T> {
    pub source: DataSource,
    pub items: T,
}

impl<T> Sourced<T> {
    pub fn live(items: T) -> Self {
        Self {
            source: DataSource::Live,
            items,
        }
    }

    pub fn placeholder(items: T) -> Self {
        Self {
            source: DataSource::Placeholder,
            items,
        }
    }
}
