//! Common parser combinators and error conversion

mod parsers;

pub use parsers::*;
