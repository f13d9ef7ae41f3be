//! A growable array and a separately-chained hash table.
//!
//! Both collections report contract violations (bad index, empty pop, missing
//! key) through [`Result`]s carrying the types in [`error`].

#![deny(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

pub mod collections;
pub mod error;
pub mod logger;

/// Arrays & Hashing Prelude
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::dynamic_array;

    #[doc(no_inline)]
    pub use super::collections::dynamic_array::DynamicArray;
    #[doc(no_inline)]
    pub use super::collections::hash_table::{FnvBuildHasher, HashTable};

    #[doc(no_inline)]
    pub use super::error::{ArrayError, TableError};
}
