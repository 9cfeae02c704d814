use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::TargetError;

/// The page containers the renderer writes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    ResearchPillars,
    Publications,
    Events,
    PrincipalInvestigator,
    Team,
    LabAddress,
    ContactEmail,
}

impl Section {
    pub const ALL: [Self; 7] = [
        Self::ResearchPillars,
        Self::Publications,
        Self::Events,
        Self::PrincipalInvestigator,
        Self::Team,
        Self::LabAddress,
        Self::ContactEmail,
    ];

    /// Element id of the container in the page markup.
    pub const fn container_id(self) -> &'static str {
        match self {
            Self::ResearchPillars => "research-grid",
            Self::Publications => "publications-list",
            Self::Events => "events-grid",
            Self::PrincipalInvestigator => "pi-section",
            Self::Team => "team-grid",
            Self::LabAddress => "lab-address",
            Self::ContactEmail => "contact-email",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ResearchPillars => "Research pillars",
            Self::Publications => "Publications",
            Self::Events => "Events",
            Self::PrincipalInvestigator => "Principal investigator",
            Self::Team => "Team",
            Self::LabAddress => "Lab address",
            Self::ContactEmail => "Contact email",
        }
    }
}

/// Where rendered fragments go.
///
/// Writes to a section whose container is absent are the caller's concern: the
/// pipeline checks [`RenderTarget::has_container`] first and skips the step.
pub trait RenderTarget {
    fn has_container(&self, section: Section) -> bool;

    /// Replaces the container's contents with `fragment`.
    fn replace_contents(&mut self, section: Section, fragment: &str) -> Result<(), TargetError>;

    /// Inserts `fragment` immediately before the first descendant carrying `anchor_class`.
    /// Returns `Ok(false)` when no such descendant exists.
    fn insert_before(
        &mut self,
        section: Section,
        anchor_class: &str,
        fragment: &str,
    ) -> Result<bool, TargetError>;

    /// Removes every child carrying `class`, returning how many were removed.
    fn remove_matching(&mut self, section: Section, class: &str) -> Result<usize, TargetError>;

    fn set_attribute(
        &mut self,
        section: Section,
        name: &str,
        value: &str,
    ) -> Result<(), TargetError>;
}

/// A child block of a [`MemoryContainer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoryNode {
    pub classes: Vec<String>,
    pub html: String,
}

impl MemoryNode {
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            classes: Vec::new(),
            html: html.into(),
        }
    }

    /// A block for a rendered fragment, tagged with every class used inside it.
    pub fn from_fragment(html: &str) -> Self {
        let mut classes: Vec<String> = Vec::new();
        for attribute in html.split("class=\"").skip(1) {
            let value = attribute.split('"').next().unwrap_or_default();
            for class in value.split_whitespace() {
                if !classes.iter().any(|known| known == class) {
                    classes.push(class.to_string());
                }
            }
        }
        Self {
            classes,
            html: html.to_string(),
        }
    }

    #[cfg(test)]
    #[must_use]
    pub(crate) fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|candidate| candidate == class)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MemoryContainer {
    pub children: Vec<MemoryNode>,
    pub attributes: BTreeMap<String, String>,
}

impl MemoryContainer {
    pub fn inner_html(&self) -> String {
        self.children.iter().map(|node| node.html.as_str()).collect()
    }
}

/// An in-memory page: a set of containers, each a flat list of child blocks.
///
/// Each written fragment becomes one block tagged with the classes it uses, which
/// is enough to model anchor lookups and marker removal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MemoryTarget {
    containers: BTreeMap<Section, MemoryContainer>,
}

impl MemoryTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// A page where every known container exists and is empty.
    pub fn with_all_sections() -> Self {
        let mut target = Self::new();
        for section in Section::ALL {
            target.add_container(section);
        }
        target
    }

    pub fn add_container(&mut self, section: Section) -> &mut MemoryContainer {
        self.containers.entry(section).or_default()
    }

    #[must_use]
    pub fn with_container(mut self, section: Section, children: Vec<MemoryNode>) -> Self {
        self.add_container(section).children = children;
        self
    }

    pub fn container(&self, section: Section) -> Option<&MemoryContainer> {
        self.containers.get(&section)
    }

    pub fn inner_html(&self, section: Section) -> Option<String> {
        self.container(section).map(MemoryContainer::inner_html)
    }

    pub fn attribute(&self, section: Section, name: &str) -> Option<&str> {
        self.container(section)
            .and_then(|container| container.attributes.get(name))
            .map(String::as_str)
    }

    /// Container id to rendered contents, for export.
    pub fn to_bundle(&self) -> BTreeMap<&'static str, &MemoryContainer> {
        self.containers
            .iter()
            .map(|(section, container)| (section.container_id(), container))
            .collect()
    }

    fn container_mut(&mut self, section: Section) -> Result<&mut MemoryContainer, TargetError> {
        self.containers
            .get_mut(&section)
            .ok_or_else(|| TargetError::new(section.container_id(), "container not found"))
    }
}

impl RenderTarget for MemoryTarget {
    fn has_container(&self, section: Section) -> bool {
        self.containers.contains_key(&section)
    }

    fn replace_contents(&mut self, section: Section, fragment: &str) -> Result<(), TargetError> {
        self.container_mut(section)?.children = vec![MemoryNode::from_fragment(fragment)];
        Ok(())
    }

    fn insert_before(
        &mut self,
        section: Section,
        anchor_class: &str,
        fragment: &str,
    ) -> Result<bool, TargetError> {
        let container = self.container_mut(section)?;
        let Some(index) = container
            .children
            .iter()
            .position(|node| node.has_class(anchor_class))
        else {
            return Ok(false);
        };

        container
            .children
            .insert(index, MemoryNode::from_fragment(fragment));
        Ok(true)
    }

    fn remove_matching(&mut self, section: Section, class: &str) -> Result<usize, TargetError> {
        let container = self.container_mut(section)?;
        let before = container.children.len();
        container.children.retain(|node| !node.has_class(class));
        Ok(before - container.children.len())
    }

    fn set_attribute(
        &mut self,
        section: Section,
        name: &str,
        value: &str,
    ) -> Result<(), TargetError> {
        self.container_mut(section)?
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }
}
