//! Command implementations

mod check;
mod compare;
mod export;
mod optimize;
mod suggest;
mod validate;

pub use check::Check;
pub use compare::Compare;
pub use export::Export;
pub use optimize::Optimize;
pub use suggest::Suggest;
pub use validate::Validate;
