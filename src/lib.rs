pub mod ir;
pub mod parser;
pub mod pass;
pub mod transform;
