//! Convenient imports for typical `sqlol` usage.
//!
//! ```ignore
//! use sqlol::prelude::*;
//! ```

pub use crate::{
    ConditionSet, DeleteBuilder, Encode, Filter, InsertBuilder, IsEmpty, Json, Record, SelectBuilder,
    SqlBuilder, SqlError, SqlResult, UpdateBuilder, Value, encode,
};

pub use crate::{Strategy, TryDateRange, TryEqual, TryIn, TryLike, TryMultiLike, TryTimeRange};
