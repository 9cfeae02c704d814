use lab_site::menu::{MenuEvent, MenuState};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, Node};

const MENU_BUTTON_ID: &str = "menu-btn";
const MOBILE_MENU_ID: &str = "mobile-menu";
const NAV_LINKS: &str = r##"header a[href^="#"]"##;
const HIDDEN_CLASS: &str = "hidden";
const READY_ATTRIBUTE: &str = "data-menu-ready";

/// Wires the menu button, the in-page nav links, and outside clicks to the panel.
///
/// Missing button or panel leaves the page alone. Calling this again is a no-op.
pub fn init_mobile_menu(document: &Document) -> Result<(), JsValue> {
    let (Some(button), Some(panel)) = (
        document.get_element_by_id(MENU_BUTTON_ID),
        document.get_element_by_id(MOBILE_MENU_ID),
    ) else {
        return Ok(());
    };

    if button.has_attribute(READY_ATTRIBUTE) {
        return Ok(());
    }
    button.set_attribute(READY_ATTRIBUTE, "")?;

    listen(&button, {
        let panel = panel.clone();
        move |_| apply(&panel, MenuEvent::ToggleClicked)
    })?;

    let links = document.query_selector_all(NAV_LINKS)?;
    for index in 0..links.length() {
        let Some(link) = links.item(index) else {
            continue;
        };
        listen(&link, {
            let panel = panel.clone();
            move |_| apply(&panel, MenuEvent::NavLinkClicked)
        })?;
    }

    listen(document, move |event| {
        let target = event.target();
        let node = target.as_ref().and_then(|target| target.dyn_ref::<Node>());
        apply(
            &panel,
            MenuEvent::DocumentClicked {
                inside_menu: panel.contains(node),
                on_toggle: button.contains(node),
            },
        );
    })
}

fn listen(target: &EventTarget, handler: impl FnMut(Event) + 'static) -> Result<(), JsValue> {
    let callback = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

/// Reads visibility from the panel's classes, applies `event`, and writes it back.
fn apply(panel: &Element, event: MenuEvent) {
    let classes = panel.class_list();
    let Some(hidden) = next_hidden(classes.contains(HIDDEN_CLASS), event) else {
        return;
    };
    if let Err(error) = classes.toggle_with_force(HIDDEN_CLASS, hidden) {
        web_sys::console::error_1(&error);
    }
}

/// The panel's new `hidden` flag, or `None` when `event` leaves it as is.
fn next_hidden(hidden: bool, event: MenuEvent) -> Option<bool> {
    let mut state = MenuState::with_hidden(hidden);
    state.handle(event).then(|| state.is_hidden())
}
