pub mod error;
pub mod rules;

pub use error::{Result, RuleError};
pub use rules::{parse_rule, FieldValue, RuleModel};
