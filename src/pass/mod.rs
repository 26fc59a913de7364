pub mod accessor;
pub mod inline_fields;
pub mod pattern;
pub mod rewrite;
