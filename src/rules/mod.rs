// Rule model - Snort-compatible rule parsing and rendering
pub mod keywords;
pub mod model;
pub mod parser;

pub use keywords::{
    base_name, is_argless, is_content_modifier, is_header, ARGLESS_KEYWORDS, CONTENT_MODIFIERS,
    HEADER_KEYS,
};
pub use model::{FieldValue, RuleModel};
pub use parser::parse_rule;
