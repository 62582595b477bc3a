pub mod validation;

pub use validation::{RequiredFields, ValidatedJson};
