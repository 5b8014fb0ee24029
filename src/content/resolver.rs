use crate::{content::catalog::Localizer, foundation::core::SectionId};

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
/// Text shown inside one section's overlay.
pub struct ContentBundle {
    /// Headline.
    pub title: String,
    /// Line under the headline.
    pub subtitle: String,
    /// Small category label.
    pub category: String,
    /// Bullet items.
    pub items: Vec<String>,
    /// Pluralized item count label, when the catalog defines one.
    pub count_label: Option<String>,
}

/// Maps section indices to localized content.
///
/// Sections outside `0..count` resolve to section 0.
#[derive(Debug)]
pub struct ContentResolver<L> {
    localizer: L,
    count: usize,
}

impl<L: Localizer> ContentResolver<L> {
    /// Resolver over `count` sections.
    pub fn new(localizer: L, count: usize) -> Self {
        Self { localizer, count }
    }

    /// Number of known sections.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Backing localizer.
    pub fn localizer(&self) -> &L {
        &self.localizer
    }

    /// Bundle for `section`, falling back to section 0.
    pub fn resolve(&self, section: SectionId) -> ContentBundle {
        let idx = if section.0 < self.count {
            section.0
        } else {
            tracing::debug!(section = %section, "unknown section, using default content");
            0
        };

        let key = |field: &str| format!("sections.{idx}.{field}");
        let text = |field: &str| {
            let k = key(field);
            self.localizer.text(&k).unwrap_or(k)
        };

        let items = self.localizer.list(&key("items")).unwrap_or_default();
        let count_label = self.localizer.plural(&key("count"), items.len());
        ContentBundle {
            title: text("title"),
            subtitle: text("subtitle"),
            category: text("category"),
            items,
            count_label,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/content/resolver.rs"]
mod tests;
