#![no_main]

use libfuzzer_sys::fuzz_target;

use arbitrary::Arbitrary;
use liana::HashTable;
use std::collections::HashMap as StdHashMap;

#[derive(Debug, Arbitrary)]
enum Operation {
    Insert(u8, u8),
    Remove(u8),
    Contains(u8),
    Len,
    IsEmpty,
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    operations: Vec<Operation>,
}

fn fuzz_hashtable(input: FuzzInput) {
    // The table borrows its keys and values, so every possible u8 lives in
    // an arena that outlives it.
    let arena: Vec<u8> = (0u8..=255).collect();

    let mut std_map = StdHashMap::new();
    let mut table = HashTable::with_capacity(1).unwrap();

    for op in &input.operations {
        match *op {
            Operation::Insert(k, v) => {
                let std_result = std_map.insert(k, v);
                let result = table
                    .insert(&arena[k as usize], &arena[v as usize])
                    .unwrap();
                assert_eq!(result.replaced().copied(), std_result);
            }
            Operation::Remove(k) => {
                assert_eq!(table.remove(&k).copied(), std_map.remove(&k));
            }
            Operation::Contains(k) => {
                assert_eq!(table.contains_key(&k), std_map.contains_key(&k));
            }
            Operation::Len => {
                assert_eq!(table.len(), std_map.len());
            }
            Operation::IsEmpty => {
                assert_eq!(table.is_empty(), std_map.is_empty());
            }
        }
    }

    // Final consistency checks
    for k in std_map.keys() {
        assert!(table.contains_key(k));
    }
    assert_eq!(table.len(), std_map.len());
}

fuzz_target!(|data: FuzzInput| {
    fuzz_hashtable(data);
});
