#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Both predicate parsers must reject bad input with an error, never a panic
    let _ = dirt_search::query::parse_rotation_list(data);
    let _ = dirt_search::query::parse_constraint_objects(data);
});
