mod evaluator;
mod path;
mod row;
mod set;
mod values;

pub use evaluator::evaluate;
pub use path::{FieldRef, PathSegment};
pub use row::ConditionRow;
pub use set::ConditionSet;
pub use values::{SubmittedValues, ValueSource};
