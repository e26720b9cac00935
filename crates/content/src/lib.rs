use std::collections::BTreeSet;
use std::sync::{Arc, OnceLock};

use core_types::Profile;
use thiserror::Error;
use tracing::debug;

mod view;

pub use view::{
    EducationView, ExperienceView, FocusAreaView, ProfileView, ProjectView, focus_areas, project,
    project_for_code,
};

const PROFILE_JSON: &str = include_str!("../data/profile.json");

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to parse profile content")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate project id `{0}`")]
    DuplicateProjectId(String),
    #[error("project at position {0} has an empty id")]
    EmptyProjectId(usize),
}

/// The profile compiled into the binary, parsed and validated once per process.
pub fn embedded_profile() -> Result<Arc<Profile>, ContentError> {
    static EMBEDDED: OnceLock<Arc<Profile>> = OnceLock::new();

    if let Some(profile) = EMBEDDED.get() {
        return Ok(Arc::clone(profile));
    }
    let profile = Arc::new(load_profile(PROFILE_JSON)?);
    Ok(Arc::clone(EMBEDDED.get_or_init(|| profile)))
}

pub fn load_profile(json: &str) -> Result<Profile, ContentError> {
    let profile: Profile = serde_json::from_str(json)?;
    validate_profile(&profile)?;
    debug!(
        projects = profile.projects.len(),
        education = profile.education.len(),
        experience = profile.experience.len(),
        "profile content loaded"
    );
    Ok(profile)
}

pub fn validate_profile(profile: &Profile) -> Result<(), ContentError> {
    let mut seen = BTreeSet::new();
    for (index, project) in profile.projects.iter().enumerate() {
        if project.id.trim().is_empty() {
            return Err(ContentError::EmptyProjectId(index));
        }
        if !seen.insert(project.id.as_str()) {
            return Err(ContentError::DuplicateProjectId(project.id.clone()));
        }
    }
    Ok(())
}
