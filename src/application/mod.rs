//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Components
//!
//! - `SelectionState` - Selected nodes of one tree snapshot, pushing changes to a sink
//! - `FormStateStore` - The wizard's form fields for the filter step
//! - `FilterSession` - Orchestrates fetches, mode switches, checks and search
//! - `validate_source` - Checks every export of an inventory source

pub mod form_state;
pub mod selection;
pub mod session;
pub mod validation;

pub use form_state::{FormState, FormStateStore};
pub use selection::{SelectionState, ToggleOutcome};
pub use session::{
    CheckOutcome, FetchTicket, FilterSession, FilterView, ViewOptions, ViewStatus,
    LONG_LOADING_MESSAGE, TREE_ERROR_TITLE, VMS_ERROR_TITLE,
};
pub use validation::{validate_source, ValidationEntry, ValidationReport};
