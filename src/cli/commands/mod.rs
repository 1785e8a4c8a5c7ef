pub mod config;
pub mod inspect;
pub mod plans;
pub mod renewal;

pub use config::{ConfigCommands, handle_config_command};
pub use inspect::{InspectCommands, handle_inspect_command};
pub use plans::{PlansCommands, handle_plans_command};
pub use renewal::{RenewalCommands, handle_renewal_command};
