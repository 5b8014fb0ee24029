use std::{fs::File, io::BufReader, path::Path};

use crate::{
    cache::factory::DecorFactory,
    cache::key::ResourceKey,
    cache::store::ResourceFactory,
    decor::components::DecorSpec,
    foundation::error::{StageError, StageResult},
    gallery::viewer::Project,
    section::fade::{FadeConfig, SectionKind},
};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// One section of the page.
pub struct SectionConfig {
    /// Section flavour.
    #[serde(default)]
    pub kind: SectionKind,
    /// Decorative components rendered inside this section.
    #[serde(default)]
    pub decor: Vec<DecorSpec>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Everything needed to assemble a [`crate::Stage`].
///
/// All fields are optional in JSON; missing ones take the built-in portfolio layout.
pub struct StageConfig {
    /// Sections in scroll order.
    pub sections: Vec<SectionConfig>,
    /// Section shown at start.
    pub initial_section: usize,
    /// Fade tuning.
    pub fade: FadeConfig,
    /// When set, a running transition is committed after this many seconds.
    pub transition_secs: Option<f64>,
    /// Portfolio projects for the gallery.
    pub projects: Vec<Project>,
}

impl Default for StageConfig {
    fn default() -> Self {
        let section = |kind, decor| SectionConfig { kind, decor };
        Self {
            sections: vec![
                section(
                    SectionKind::Hero,
                    vec![
                        DecorSpec::Stars {
                            points: "stars:count=300,radius=50".to_string(),
                            material: "material:color=#ffffff,opacity=0.9,additive=true"
                                .to_string(),
                            rotation_speed: 0.02,
                        },
                        DecorSpec::Dust {
                            points: "dust:count=120,spread=10".to_string(),
                            material: "material:color=#88aaff,opacity=0.4".to_string(),
                            drift_speed: 0.1,
                        },
                    ],
                ),
                section(
                    SectionKind::Standard,
                    vec![DecorSpec::Laptop {
                        model: "laptop:screen=16x10".to_string(),
                    }],
                ),
                section(
                    SectionKind::Standard,
                    vec![DecorSpec::Satellite {
                        orbit: "orbit:radius=6,segments=64".to_string(),
                        angular_speed: 0.5,
                    }],
                ),
                section(SectionKind::Standard, vec![]),
            ],
            initial_section: 0,
            fade: FadeConfig::default(),
            transition_secs: None,
            projects: Vec::new(),
        }
    }
}

impl StageConfig {
    /// Parse a stage config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> StageResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| StageError::serde(format!("parse stage config JSON: {e}")))
    }

    /// Parse a stage config from a JSON string.
    pub fn from_json_str(s: &str) -> StageResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| StageError::serde(format!("parse stage config JSON: {e}")))
    }

    /// Parse a stage config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> StageResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            StageError::validation(format!("open stage config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check structural constraints that serde cannot express.
    pub fn validate(&self) -> StageResult<()> {
        if self.sections.is_empty() {
            return Err(StageError::validation("stage needs at least one section"));
        }
        if self.initial_section >= self.sections.len() {
            return Err(StageError::validation(format!(
                "initial_section {} out of range ({} sections)",
                self.initial_section,
                self.sections.len()
            )));
        }
        self.fade.validate()?;
        if let Some(secs) = self.transition_secs
            && (!secs.is_finite() || secs < 0.0)
        {
            return Err(StageError::validation(
                "transition_secs must be finite and >= 0",
            ));
        }
        for (i, section) in self.sections.iter().enumerate() {
            for spec in &section.decor {
                for descriptor in spec.descriptors() {
                    ResourceKey::parse(descriptor)
                        .and_then(|key| DecorFactory.canonical_key(key))
                        .map_err(|e| {
                            StageError::validation(format!("sections[{i}].decor: {e}"))
                        })?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/config.rs"]
mod tests;
