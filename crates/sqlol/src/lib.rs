//! # sqlol
//!
//! Text-level SQL construction for PostgreSQL: escaped literals, record
//! column reflection and composable WHERE clauses.
//!
//! ## Features
//!
//! - **Literal encoding**: any supported value to safe SQL literal text (`encode`)
//! - **Record reflection**: ordered column lists and value tuples via `#[derive(Record)]`
//! - **Condition sets**: AND-accumulated, self-parenthesized predicates with
//!   `try_*` variants that skip empty operands
//! - **Statement builders**: thin SELECT / INSERT / UPDATE / DELETE assemblers
//! - **Safe defaults**: DELETE requires WHERE, UPDATE requires SET
//!
//! ```ignore
//! use sqlol::prelude::*;
//!
//! let mut q = SelectBuilder::new("users");
//! q.fields(["id", "name"])
//!     .try_equal("status", "active")
//!     .try_like("name", "  ")          // skipped: blank
//!     .in_list("role", ["admin", "dev"])
//!     .order_by(["created_at DESC"])
//!     .limit(10);
//!
//! assert_eq!(
//!     q.build()?,
//!     "SELECT id,name FROM users WHERE (status = 'active') AND (role IN ('admin','dev')) \
//!      ORDER BY created_at DESC LIMIT 10"
//! );
//! ```

extern crate self as sqlol;

/// Emit a `debug` event on the `sqlol.sql` target.
#[cfg(feature = "tracing")]
macro_rules! sql_debug {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "sqlol.sql", $($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! sql_debug {
    ($($arg:tt)*) => {};
}

/// Emit a `warn` event on the `sqlol.sql` target.
#[cfg(feature = "tracing")]
macro_rules! sql_warn {
    ($($arg:tt)*) => {
        ::tracing::warn!(target: "sqlol.sql", $($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! sql_warn {
    ($($arg:tt)*) => {};
}

pub(crate) use {sql_debug, sql_warn};

pub mod builder;
pub mod case;
pub mod condition;
pub mod empty;
pub mod error;
pub mod literal;
pub mod prelude;
pub mod record;

pub use builder::{
    BuilderConfig, DeleteBuilder, Filter, InsertBuilder, Naming, SelectBuilder, SqlBuilder,
    UpdateBuilder,
};
pub use case::{camel_to_snake, camels_to_snakes, snake_to_camel};
pub use condition::{AnyOperand, ConditionSet, Operand};
pub use condition::strategy::{
    Strategy, TryDateRange, TryEqual, TryIn, TryLike, TryMultiLike, TryTimeRange,
};
pub use empty::{IsEmpty, is_empty};
pub use error::{SqlError, SqlResult};
pub use literal::{Encode, Json, ToJson, Valuer, ValuerError, Value, encode, encode_list, quote};
pub use record::{
    ColumnSpec, FieldPath, FieldRef, Record, columns_of, encode_tuple, encode_tuples, field_value,
};

#[cfg(feature = "derive")]
pub use sqlol_derive::Record;
