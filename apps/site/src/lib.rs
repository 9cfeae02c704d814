// Export our modules for use in the web and cli binaries and in tests
pub mod error;
pub mod markup;
pub mod menu;
pub mod model;
pub mod naming;
pub mod pipeline;
pub mod rules;
pub mod target;

pub use error::{LoadError, TargetError};
pub use model::LabDocument;
pub use pipeline::{RenderReport, Renderer, StepOutcome};
pub use rules::{AuthorMatch, RenderRules};
pub use target::{MemoryTarget, RenderTarget, Section};
