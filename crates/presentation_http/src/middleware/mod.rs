//! HTTP middleware and extractors

mod validation;

pub use validation::ValidatedJson;
