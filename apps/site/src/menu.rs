/// Clicks the mobile menu reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    /// The menu button itself.
    ToggleClicked,
    /// Any in-page navigation link.
    NavLinkClicked,
    /// A click anywhere in the document, with where it landed.
    DocumentClicked { inside_menu: bool, on_toggle: bool },
}

/// Visibility of the mobile navigation panel. Starts hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuState {
    hidden: bool,
}

impl Default for MenuState {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuState {
    pub const fn new() -> Self {
        Self { hidden: true }
    }

    pub const fn with_hidden(hidden: bool) -> Self {
        Self { hidden }
    }

    pub const fn is_hidden(self) -> bool {
        self.hidden
    }

    /// Applies `event` and returns whether visibility changed.
    pub fn handle(&mut self, event: MenuEvent) -> bool {
        let next = match event {
            MenuEvent::ToggleClicked => !self.hidden,
            MenuEvent::NavLinkClicked => true,
            MenuEvent::DocumentClicked {
                inside_menu,
                on_toggle,
            } => {
                if inside_menu || on_toggle {
                    self.hidden
                } else {
                    true
                }
            }
        };

        let changed = next != self.hidden;
        self.hidden = next;
        changed
    }
}
