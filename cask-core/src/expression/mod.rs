mod aggregate;
mod expression;
mod operator;
mod predicate;
mod projection;

pub use aggregate::*;
pub use expression::*;
pub use operator::*;
pub use predicate::*;
pub use projection::*;
