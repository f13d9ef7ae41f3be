//! Collection Types.

pub mod dynamic_array;
pub mod hash_table;

pub use dynamic_array::DynamicArray;
pub use hash_table::HashTable;
