//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod check_state;
mod config_warning;
mod grouping_mode;
mod identifiers;
mod provider_type;

pub use check_state::CheckState;
pub use config_warning::ConfigWarning;
pub use grouping_mode::GroupingMode;
pub use identifiers::{NodeId, VmId};
pub use provider_type::ProviderType;
