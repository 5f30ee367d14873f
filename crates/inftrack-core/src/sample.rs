use std::path::Path;

use serde::Deserialize;

use crate::influencers::NewInfluencer;
use crate::ConfigError;

#[derive(Debug, Deserialize)]
struct SampleFile {
    influencers: Vec<NewInfluencer>,
}

/// Load and validate the demo roster from a YAML file.
///
/// Usernames are returned trimmed.
///
/// # Errors
///
/// Returns [`ConfigError::SampleFileIo`] if the file cannot be read,
/// [`ConfigError::SampleFileParse`] if it is not valid YAML for the expected
/// shape, or [`ConfigError::SampleValidation`] if an entry has a blank
/// username.
pub fn load_sample_influencers(path: &Path) -> Result<Vec<NewInfluencer>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SampleFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: SampleFile = serde_yaml::from_str(&content)?;

    file.influencers.into_iter().map(validate).collect()
}

fn validate(mut form: NewInfluencer) -> Result<NewInfluencer, ConfigError> {
    let trimmed = form.username.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::SampleValidation {
            username: form.username,
            source: crate::CoreError::EmptyUsername,
        });
    }
    form.username = trimmed.to_string();
    Ok(form)
}
