//! Criteria and expected-value expressions
//!
//! This crate defines what a test author hands to the assertion engine (a
//! [`Criteria`] map of loosely named fields to raw expected values) and the
//! closed [`Expression`] union each raw value is parsed into.

mod criteria;
mod expression;
mod kind;
mod operator;
mod value;

pub use criteria::*;
pub use expression::*;
pub use kind::*;
pub use operator::*;
pub use value::*;
