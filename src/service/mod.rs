//! Request validation against an entity's schema descriptor.

mod validation;
pub use validation::RequestValidator;
