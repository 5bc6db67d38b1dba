#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Block {
    x: i32,
    y: i32,
    z: i32,
}

fuzz_target!(|block: Block| {
    let rotation = dirt_search::world::orientation(block.x, block.y, block.z);
    assert!((0..4).contains(&rotation));
    assert_eq!(rotation, dirt_search::world::orientation(block.x, block.y, block.z));
});
