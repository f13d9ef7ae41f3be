use std::error::Error;

use log::{error, info};

use arrays_hashing::logger::initialize_logger;
use arrays_hashing::prelude::*;

fn array_demo() -> Result<(), ArrayError> {
    let mut arr = DynamicArray::new();

    arr.append(10);
    arr.append(20);
    arr.append(30);
    info!("after appending 10, 20, 30: {arr}");

    arr.insert_at(1, 15)?;
    info!("after inserting 15 at index 1: {arr}");

    info!("element at index 2: {}", arr.get(2)?);

    arr.set(2, 25)?;
    info!("after setting index 2 to 25: {arr}");

    arr.remove_at(1)?;
    info!("after removing index 1: {arr}");

    let popped = arr.pop()?;
    info!("popped {popped}: {arr}");

    info!("len: {}, capacity: {}", arr.len(), arr.capacity());

    arr.clear();
    info!("after clear: {arr} (capacity {})", arr.capacity());

    Ok(())
}

fn table_demo() -> Result<(), TableError> {
    let mut table = HashTable::with_capacity(8)?;

    table.set("apple", 3);
    table.set("banana", 7);
    table.set("orange", 5);
    table.set("banana", 10);

    info!("banana => {}", table.get("banana")?);

    table.remove("apple")?;
    match table.get("apple") {
        Ok(value) => info!("apple => {value}"),
        Err(e) => info!("apple: {e}"),
    }

    info!("len: {}, load factor: {:.2}", table.len(), table.load_factor());

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    initialize_logger();

    if let Err(e) = array_demo() {
        error!("array demo failed: {e}");
        return Err(e.into());
    }

    if let Err(e) = table_demo() {
        error!("table demo failed: {e}");
        return Err(e.into());
    }

    Ok(())
}
