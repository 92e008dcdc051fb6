//! SIP control-plane model types.

mod dispatch_rule;
mod participant;
mod trunk;

pub use dispatch_rule::*;
pub use participant::*;
pub use trunk::*;
