mod dom;
mod fetch;
mod menu;

use lab_site::{RenderReport, RenderRules, Renderer, StepOutcome};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Document;

use crate::dom::DomTarget;

const DATA_URL: &str = "./data.json";

fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return Ok(());
    };

    let page = document.clone();
    on_dom_ready(&page, move || {
        if let Err(error) = menu::init_mobile_menu(&document) {
            web_sys::console::error_2(&"Failed to wire mobile menu:".into(), &error);
        }
        spawn_local(load_dynamic_data(document));
    })
}

/// Runs `start` once the page markup is parsed.
fn on_dom_ready(document: &Document, start: impl FnOnce() + 'static) -> Result<(), JsValue> {
    if document.ready_state() != "loading" {
        start();
        return Ok(());
    }

    let callback = Closure::<dyn FnMut()>::once(start);
    document.add_event_listener_with_callback(
        "DOMContentLoaded",
        callback.as_ref().unchecked_ref(),
    )?;
    callback.forget();
    Ok(())
}

/// Fetches `data.json` once and renders every section, or the fallback message.
async fn load_dynamic_data(document: Document) {
    let loaded = fetch::fetch_lab_document(DATA_URL).await;
    if let Err(error) = &loaded {
        web_sys::console::error_1(&format!("Failed to load lab data: {error}").into());
    }

    let mut target = DomTarget::new(document);
    let report = Renderer::new(RenderRules::default()).apply(loaded, &mut target);

    for warning in failure_warnings(&report) {
        web_sys::console::warn_1(&warning.into());
    }
}

/// One console line per section whose write failed.
fn failure_warnings(report: &RenderReport) -> Vec<String> {
    report
        .steps
        .iter()
        .filter_map(|(section, outcome)| match outcome {
            StepOutcome::Failed { message } => Some(format!("{}: {message}", section.label())),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lab_site::Section;

    #[test]
    fn only_failed_sections_are_warned() {
        let report = RenderReport {
            steps: vec![
                (Section::ResearchPillars, StepOutcome::Rendered { entries: 3 }),
                (
                    Section::Team,
                    StepOutcome::Failed {
                        message: "detached".to_string(),
                    },
                ),
                (Section::ContactEmail, StepOutcome::MissingContainer),
            ],
            load_error: None,
        };

        assert_eq!(failure_warnings(&report), vec!["Team: detached".to_string()]);
    }

    #[test]
    fn clean_report_has_no_warnings() {
        assert!(failure_warnings(&RenderReport::default()).is_empty());
    }
}
