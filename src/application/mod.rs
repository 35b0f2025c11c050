// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! - [`port`]: Trait definitions for the collaborators the lightbox does not own
//! - [`gallery`]: Page list, current index and preload window
//! - [`edit`]: Edit mode and per-page annotation surfaces
//! - [`scroll`]: Drag-end paging
//! - [`eligibility`]: Whether a page may be annotated
//! - [`tasks`]: Background work and the runner that drives it
//! - [`lightbox`]: The coordinator a host UI talks to
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - Hosts drive [`Lightbox`] and never touch the models directly

pub mod chrome;
pub mod edit;
pub mod eligibility;
pub mod gallery;
pub mod lightbox;
pub mod port;
pub mod preload;
pub mod scroll;
pub mod tasks;

pub use chrome::{ChromeSnapshot, ChromeState};
pub use edit::PageEditState;
pub use eligibility::compute_eligibility;
pub use gallery::{DeleteOutcome, GalleryModel};
pub use lightbox::{CloseOutcome, EditExit, Lightbox, LightboxBuilder};
pub use preload::preload_window;
pub use scroll::{resolve_target_page, PageLayout, PageTarget};
pub use tasks::{
    Completion, EligibilityProbe, EligibilityReport, FetchCompletion, FetchRequest, FetchTicket,
    TaskRunner, Work,
};
