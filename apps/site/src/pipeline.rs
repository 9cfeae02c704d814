use serde::Serialize;
use tracing::{debug, error, warn};

use crate::error::{LoadError, TargetError};
use crate::markup::{
    self, render_all, render_event, render_pi, render_publication, render_research_pillar,
    render_team_member, MEMBER_CARD_CLASS,
};
use crate::model::LabDocument;
use crate::naming::pi_short_name;
use crate::rules::RenderRules;
use crate::target::{RenderTarget, Section};

/// What happened to one section during a render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    Rendered { entries: usize },
    MissingContainer,
    MissingData,
    Failed { message: String },
    /// Nothing rendered because the document never loaded.
    NotLoaded,
}

impl StepOutcome {
    pub const fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered { .. })
    }
}

/// Per-section outcomes in render order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderReport {
    pub steps: Vec<(Section, StepOutcome)>,
    pub load_error: Option<String>,
}

impl RenderReport {
    pub fn outcome(&self, section: Section) -> Option<&StepOutcome> {
        self.steps
            .iter()
            .find(|(candidate, _)| *candidate == section)
            .map(|(_, outcome)| outcome)
    }

    pub fn rendered_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|(_, outcome)| outcome.is_rendered())
            .count()
    }

    pub fn has_failures(&self) -> bool {
        self.load_error.is_some()
            || self
                .steps
                .iter()
                .any(|(_, outcome)| matches!(outcome, StepOutcome::Failed { .. }))
    }

    fn record(&mut self, section: Section, outcome: StepOutcome) {
        self.steps.push((section, outcome));
    }
}

/// Renders a loaded lab document into a [`RenderTarget`].
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    rules: RenderRules,
}

impl Renderer {
    pub const fn new(rules: RenderRules) -> Self {
        Self { rules }
    }

    /// Renders a fetch result: the document on success, the fallback message on failure.
    pub fn apply(
        &self,
        loaded: Result<LabDocument, LoadError>,
        target: &mut impl RenderTarget,
    ) -> RenderReport {
        match loaded {
            Ok(document) => self.render(&document, target),
            Err(load_error) => Self::render_failure(&load_error, target),
        }
    }

    /// Writes the load-failure message into the research container only.
    pub fn render_failure(load_error: &LoadError, target: &mut impl RenderTarget) -> RenderReport {
        error!("Failed to load lab data: {load_error}");

        let mut report = RenderReport {
            steps: Vec::new(),
            load_error: Some(load_error.to_string()),
        };

        let section = Section::ResearchPillars;
        let outcome = if target.has_container(section) {
            match target.replace_contents(section, markup::LOAD_FAILURE_HTML) {
                Ok(()) => StepOutcome::NotLoaded,
                Err(target_error) => failed(&target_error),
            }
        } else {
            StepOutcome::MissingContainer
        };
        report.record(section, outcome);
        report
    }

    /// Runs every render step in order. A step whose container is missing is skipped;
    /// a step whose write fails is recorded and the next step still runs.
    pub fn render(&self, document: &LabDocument, target: &mut impl RenderTarget) -> RenderReport {
        let mut report = RenderReport::default();

        let pillars = step(target, Section::ResearchPillars, |target| {
            let html = render_all(&document.research_pillars, render_research_pillar);
            target.replace_contents(Section::ResearchPillars, &html)?;
            Ok(StepOutcome::Rendered {
                entries: document.research_pillars.len(),
            })
        });
        report.record(Section::ResearchPillars, pillars);

        let publications = step(target, Section::Publications, |target| {
            let html = render_all(&document.publications, |publication| {
                render_publication(publication, &document.pi_name, self.rules.author_match)
            });
            target.replace_contents(Section::Publications, &html)?;
            Ok(StepOutcome::Rendered {
                entries: document.publications.len(),
            })
        });
        report.record(Section::Publications, publications);

        let events = step(target, Section::Events, |target| {
            let short_name = pi_short_name(
                &document.team.principal_investigator.name,
                &self.rules.honorific,
            );
            let html = render_all(&document.events, |event| {
                render_event(event, &self.rules.placeholder, &short_name)
            });
            target.replace_contents(Section::Events, &html)?;
            Ok(StepOutcome::Rendered {
                entries: document.events.len(),
            })
        });
        report.record(Section::Events, events);

        let pi = step(target, Section::PrincipalInvestigator, |target| {
            let html = render_pi(&document.team.principal_investigator);
            target.replace_contents(Section::PrincipalInvestigator, &html)?;
            Ok(StepOutcome::Rendered { entries: 1 })
        });
        report.record(Section::PrincipalInvestigator, pi);

        let team = step(target, Section::Team, |target| {
            let html = render_all(&document.team.members, render_team_member);
            target.remove_matching(Section::Team, MEMBER_CARD_CLASS)?;
            let anchored =
                target.insert_before(Section::Team, &self.rules.join_card_class, &html)?;
            if !anchored {
                target.replace_contents(Section::Team, &html)?;
            }
            Ok(StepOutcome::Rendered {
                entries: document.team.members.len(),
            })
        });
        report.record(Section::Team, team);

        let address = step(target, Section::LabAddress, |target| {
            let Some(contact) = &document.contact_info else {
                return Ok(StepOutcome::MissingData);
            };
            let html = markup::render_address(&contact.address);
            target.replace_contents(Section::LabAddress, &html)?;
            Ok(StepOutcome::Rendered {
                entries: contact.address.len(),
            })
        });
        report.record(Section::LabAddress, address);

        let email = step(target, Section::ContactEmail, |target| {
            let Some(contact) = &document.contact_info else {
                return Ok(StepOutcome::MissingData);
            };
            target.set_attribute(
                Section::ContactEmail,
                "href",
                &markup::mailto_href(&contact.email),
            )?;
            target.replace_contents(Section::ContactEmail, &markup::escape(contact.email.trim()))?;
            Ok(StepOutcome::Rendered { entries: 1 })
        });
        report.record(Section::ContactEmail, email);

        report
    }
}

fn step<T: RenderTarget>(
    target: &mut T,
    section: Section,
    write: impl FnOnce(&mut T) -> Result<StepOutcome, TargetError>,
) -> StepOutcome {
    if !target.has_container(section) {
        debug!("Skipping {}: #{} not found", section.label(), section.container_id());
        return StepOutcome::MissingContainer;
    }

    match write(target) {
        Ok(StepOutcome::MissingData) => {
            debug!("Skipping {}: no data in document", section.label());
            StepOutcome::MissingData
        }
        Ok(outcome) => outcome,
        Err(target_error) => failed(&target_error),
    }
}

fn failed(target_error: &TargetError) -> StepOutcome {
    warn!("Render step failed: {target_error}");
    StepOutcome::Failed {
        message: target_error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::{
        count_cards, EVENT_CARD_CLASS, PILLAR_CARD_CLASS, PI_AUTHOR_CLASS, PI_CARD_CLASS,
        PUBLICATION_CARD_CLASS,
    };
    use crate::model::fixtures;
    use crate::rules::AuthorMatch;
    use crate::target::{MemoryNode, MemoryTarget};

    const JOIN_US: &str = r#"<div class="bg-blue-50 p-6">Join us!</div>"#;

    fn html(target: &MemoryTarget, section: Section) -> String {
        target.inner_html(section).unwrap_or_default()
    }

    #[test]
    fn renders_one_card_per_entry_in_order() {
        let doc = fixtures::sample();
        let mut target = MemoryTarget::with_all_sections();
        let report = Renderer::default().render(&doc, &mut target);

        assert_eq!(report.rendered_count(), Section::ALL.len());
        assert!(!report.has_failures());

        let pillars = html(&target, Section::ResearchPillars);
        assert_eq!(count_cards(&pillars, PILLAR_CARD_CLASS), 2);
        assert_eq!(
            count_cards(&html(&target, Section::Publications), PUBLICATION_CARD_CLASS),
            3
        );
        assert_eq!(count_cards(&html(&target, Section::Events), EVENT_CARD_CLASS), 2);
        assert_eq!(
            count_cards(&html(&target, Section::PrincipalInvestigator), PI_CARD_CLASS),
            1
        );
        assert_eq!(count_cards(&html(&target, Section::Team), MEMBER_CARD_CLASS), 2);

        let babbage = html(&target, Section::Team).find("Charles Babbage");
        let somerville = html(&target, Section::Team).find("Mary Somerville");
        assert!(babbage.is_some() && babbage < somerville);
    }

    #[test]
    fn substring_rule_emphasizes_matching_publications() {
        let doc = fixtures::sample();
        let mut target = MemoryTarget::with_all_sections();
        Renderer::default().render(&doc, &mut target);

        // "Lovelace" is contained in authors of publications 1 and 3 only.
        let publications = html(&target, Section::Publications);
        let emphasized = publications.matches(PI_AUTHOR_CLASS).count();
        assert_eq!(emphasized, 2);
        assert_eq!(count_cards(&publications, PUBLICATION_CARD_CLASS) - emphasized, 1);
    }

    #[test]
    fn exact_rule_emphasizes_only_identical_names() {
        let mut doc = fixtures::sample();
        doc.pi_name = "Ada Lovelace".to_string();
        let rules = RenderRules::default().with_author_match(AuthorMatch::Exact);
        let mut target = MemoryTarget::with_all_sections();
        Renderer::new(rules).render(&doc, &mut target);

        let publications = html(&target, Section::Publications);
        assert_eq!(publications.matches(PI_AUTHOR_CLASS).count(), 1);
        assert!(publications.contains("A. Lovelace"));
    }

    #[test]
    fn events_use_the_pi_short_name() {
        let doc = fixtures::sample();
        let mut target = MemoryTarget::with_all_sections();
        Renderer::default().render(&doc, &mut target);

        let events = html(&target, Section::Events);
        assert!(events.contains("Keynote by Dr. Lovelace on loops."));
    }

    #[test]
    fn team_members_precede_join_card_without_duplicating_it() {
        let doc = fixtures::sample();
        let mut target = MemoryTarget::with_all_sections().with_container(
            Section::Team,
            vec![MemoryNode::from_fragment(JOIN_US)],
        );
        Renderer::default().render(&doc, &mut target);

        let team = html(&target, Section::Team);
        assert_eq!(team.matches("Join us!").count(), 1);
        assert!(team.ends_with(JOIN_US));
        assert_eq!(count_cards(&team, MEMBER_CARD_CLASS), 2);
        let last_member = team.rfind(MEMBER_CARD_CLASS);
        let join = team.find("Join us!");
        assert!(last_member.is_some() && last_member < join);
    }

    #[test]
    fn team_without_join_card_replaces_contents() {
        let doc = fixtures::sample();
        let mut target = MemoryTarget::with_all_sections()
            .with_container(Section::Team, vec![MemoryNode::new("<p>Loading…</p>")]);
        Renderer::default().render(&doc, &mut target);

        let team = html(&target, Section::Team);
        assert!(!team.contains("Loading"));
        assert_eq!(count_cards(&team, MEMBER_CARD_CLASS), 2);
    }

    #[test]
    fn rendering_twice_is_idempotent() {
        let doc = fixtures::sample();
        let renderer = Renderer::default();
        let mut target = MemoryTarget::with_all_sections().with_container(
            Section::Team,
            vec![MemoryNode::from_fragment(JOIN_US)],
        );

        renderer.render(&doc, &mut target);
        let first = target.clone();
        renderer.render(&doc, &mut target);

        for section in Section::ALL {
            assert_eq!(html(&first, section), html(&target, section), "{section:?}");
        }
    }

    #[test]
    fn missing_containers_are_skipped() {
        let doc = fixtures::sample();
        let mut target = MemoryTarget::new().with_container(Section::Events, Vec::new());
        let report = Renderer::default().render(&doc, &mut target);

        assert_eq!(
            report.outcome(Section::Events),
            Some(&StepOutcome::Rendered { entries: 2 })
        );
        assert_eq!(
            report.outcome(Section::Team),
            Some(&StepOutcome::MissingContainer)
        );
        assert_eq!(report.rendered_count(), 1);
    }

    #[test]
    fn contact_block_fills_address_and_mail_link() {
        let doc = fixtures::sample();
        let mut target = MemoryTarget::with_all_sections();
        Renderer::default().render(&doc, &mut target);

        assert_eq!(
            html(&target, Section::LabAddress),
            "12 St James&#x27;s Square<br>London"
        );
        assert_eq!(html(&target, Section::ContactEmail), "lab@example.org");
        assert_eq!(
            target.attribute(Section::ContactEmail, "href"),
            Some("mailto:lab@example.org")
        );
    }

    #[test]
    fn absent_contact_info_skips_contact_steps() {
        let mut doc = fixtures::sample();
        doc.contact_info = None;
        let mut target = MemoryTarget::with_all_sections()
            .with_container(Section::LabAddress, vec![MemoryNode::new("static address")]);
        let report = Renderer::default().render(&doc, &mut target);

        assert_eq!(
            report.outcome(Section::LabAddress),
            Some(&StepOutcome::MissingData)
        );
        assert_eq!(html(&target, Section::LabAddress), "static address");
        assert!(!report.has_failures());
    }

    #[test]
    fn http_failure_only_touches_research_container() {
        let mut target = MemoryTarget::with_all_sections()
            .with_container(Section::Publications, vec![MemoryNode::new("shipped")]);
        let report = Renderer::default().apply(Err(LoadError::Status(500)), &mut target);

        assert_eq!(
            html(&target, Section::ResearchPillars),
            markup::LOAD_FAILURE_HTML
        );
        assert_eq!(html(&target, Section::Publications), "shipped");
        for section in Section::ALL.into_iter().skip(2) {
            assert_eq!(html(&target, section), "");
        }
        assert_eq!(report.load_error.as_deref(), Some("HTTP error! status: 500"));
        assert!(report.has_failures());
    }

    #[test]
    fn failure_without_research_container_writes_nothing() {
        let mut target = MemoryTarget::new().with_container(Section::Events, Vec::new());
        let report = Renderer::default().apply(
            Err(LoadError::malformed("expected value")),
            &mut target,
        );

        assert_eq!(
            report.outcome(Section::ResearchPillars),
            Some(&StepOutcome::MissingContainer)
        );
        assert_eq!(html(&target, Section::Events), "");
    }

    /// Fails every write to one section.
    struct BrokenSection {
        inner: MemoryTarget,
        broken: Section,
    }

    impl RenderTarget for BrokenSection {
        fn has_container(&self, section: Section) -> bool {
            self.inner.has_container(section)
        }

        fn replace_contents(
            &mut self,
            section: Section,
            fragment: &str,
        ) -> Result<(), TargetError> {
            if section == self.broken {
                return Err(TargetError::new(section.container_id(), "detached"));
            }
            self.inner.replace_contents(section, fragment)
        }

        fn insert_before(
            &mut self,
            section: Section,
            anchor_class: &str,
            fragment: &str,
        ) -> Result<bool, TargetError> {
            self.inner.insert_before(section, anchor_class, fragment)
        }

        fn remove_matching(&mut self, section: Section, class: &str) -> Result<usize, TargetError> {
            self.inner.remove_matching(section, class)
        }

        fn set_attribute(
            &mut self,
            section: Section,
            name: &str,
            value: &str,
        ) -> Result<(), TargetError> {
            self.inner.set_attribute(section, name, value)
        }
    }

    #[test]
    fn failed_step_does_not_stop_later_steps() {
        let doc = fixtures::sample();
        let mut target = BrokenSection {
            inner: MemoryTarget::with_all_sections(),
            broken: Section::Publications,
        };
        let report = Renderer::default().render(&doc, &mut target);

        assert!(matches!(
            report.outcome(Section::Publications),
            Some(StepOutcome::Failed { .. })
        ));
        assert!(report.outcome(Section::Events).is_some_and(StepOutcome::is_rendered));
        assert!(report.has_failures());
        assert_eq!(report.rendered_count(), Section::ALL.len() - 1);
    }
}
