use lab_site::{RenderTarget, Section, TargetError};
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

/// Renders into the live page, one container per [`Section`] looked up by id.
pub struct DomTarget {
    document: Document,
}

impl DomTarget {
    pub const fn new(document: Document) -> Self {
        Self { document }
    }

    fn element(&self, section: Section) -> Result<Element, TargetError> {
        self.document
            .get_element_by_id(section.container_id())
            .ok_or_else(|| TargetError::new(section.container_id(), "container not found"))
    }

    /// Elements under the container carrying `class`, in document order.
    fn with_class(&self, section: Section, class: &str) -> Result<Vec<Element>, TargetError> {
        let collection = self.element(section)?.get_elements_by_class_name(class);
        Ok((0..collection.length())
            .filter_map(|index| collection.item(index))
            .collect())
    }
}

fn js_error(section: Section, error: &JsValue) -> TargetError {
    let message = error
        .as_string()
        .unwrap_or_else(|| format!("{error:?}"));
    TargetError::new(section.container_id(), message)
}

impl RenderTarget for DomTarget {
    fn has_container(&self, section: Section) -> bool {
        self.document
            .get_element_by_id(section.container_id())
            .is_some()
    }

    fn replace_contents(&mut self, section: Section, fragment: &str) -> Result<(), TargetError> {
        self.element(section)?.set_inner_html(fragment);
        Ok(())
    }

    fn insert_before(
        &mut self,
        section: Section,
        anchor_class: &str,
        fragment: &str,
    ) -> Result<bool, TargetError> {
        let Some(anchor) = self.with_class(section, anchor_class)?.into_iter().next() else {
            return Ok(false);
        };

        anchor
            .insert_adjacent_html("beforebegin", fragment)
            .map_err(|error| js_error(section, &error))?;
        Ok(true)
    }

    fn remove_matching(&mut self, section: Section, class: &str) -> Result<usize, TargetError> {
        // The collection is live, so it is copied before removing.
        let stale = self.with_class(section, class)?;
        for element in &stale {
            element.remove();
        }
        Ok(stale.len())
    }

    fn set_attribute(
        &mut self,
        section: Section,
        name: &str,
        value: &str,
    ) -> Result<(), TargetError> {
        self.element(section)?
            .set_attribute(name, value)
            .map_err(|error| js_error(section, &error))
    }
}
