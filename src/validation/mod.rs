//! Document validation, diagnostics formatting and export advice.

mod diagnostics;
mod export_check;
mod validate;

pub use diagnostics::*;
pub use export_check::*;
pub use validate::*;

pub(crate) use validate::is_truthy;
