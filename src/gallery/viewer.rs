use crate::foundation::error::{StageError, StageResult};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// One portfolio entry.
pub struct Project {
    /// Stable identifier, also used as the localization key prefix.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Category used for filtering.
    pub category: String,
    /// Technology tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// External link.
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Clone, Debug, Default, serde::Serialize)]
/// Ordered portfolio projects.
pub struct Gallery {
    projects: Vec<Project>,
}

impl Gallery {
    /// Gallery over `projects`; ids must be unique and non-empty.
    pub fn new(projects: Vec<Project>) -> StageResult<Self> {
        let mut seen = std::collections::HashSet::new();
        for p in &projects {
            if p.id.trim().is_empty() {
                return Err(StageError::validation("project id must be non-empty"));
            }
            if !seen.insert(p.id.as_str()) {
                return Err(StageError::validation(format!(
                    "duplicate project id '{}'",
                    p.id
                )));
            }
        }
        Ok(Self { projects })
    }

    /// All projects in display order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Number of projects.
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Whether the gallery is empty.
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Project at `index`.
    pub fn get(&self, index: usize) -> Option<&Project> {
        self.projects.get(index)
    }

    /// Projects in `category` (case-insensitive), in display order.
    pub fn filter<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Project> + 'a {
        self.projects
            .iter()
            .filter(move |p| p.category.eq_ignore_ascii_case(category))
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for p in &self.projects {
            if !out.iter().any(|c| c.eq_ignore_ascii_case(&p.category)) {
                out.push(&p.category);
            }
        }
        out
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
/// Modal state over a gallery.
pub enum ModalViewer {
    /// No project shown.
    #[default]
    Closed,
    /// Project at this gallery index is shown.
    Open(usize),
}

impl ModalViewer {
    /// Open the project at `index`.
    pub fn open(&mut self, gallery: &Gallery, index: usize) -> StageResult<&mut Self> {
        if index >= gallery.len() {
            return Err(StageError::navigation(format!(
                "project index {index} out of range (gallery has {})",
                gallery.len()
            )));
        }
        tracing::debug!(index, "modal opened");
        *self = Self::Open(index);
        Ok(self)
    }

    /// Open the project with `id`.
    pub fn open_id(&mut self, gallery: &Gallery, id: &str) -> StageResult<&mut Self> {
        let index = gallery
            .projects()
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StageError::navigation(format!("unknown project '{id}'")))?;
        self.open(gallery, index)
    }

    /// Close the modal.
    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    /// Whether a project is shown.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    /// The shown project.
    pub fn current<'g>(&self, gallery: &'g Gallery) -> Option<&'g Project> {
        match *self {
            Self::Open(i) => gallery.get(i),
            Self::Closed => None,
        }
    }

    /// Show the next project, wrapping to the first. No-op when closed.
    pub fn next(&mut self, gallery: &Gallery) {
        if let Self::Open(i) = *self
            && !gallery.is_empty()
        {
            *self = Self::Open((i + 1) % gallery.len());
        }
    }

    /// Show the previous project, wrapping to the last. No-op when closed.
    pub fn prev(&mut self, gallery: &Gallery) {
        if let Self::Open(i) = *self
            && !gallery.is_empty()
        {
            let n = gallery.len();
            *self = Self::Open((i + n - 1) % n);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gallery/viewer.rs"]
mod tests;
