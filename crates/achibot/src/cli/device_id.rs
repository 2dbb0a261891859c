//! Device ID command

use achicore::DeviceId;

pub fn run(count: usize) {
    for _ in 0..count {
        println!("{}", DeviceId::generate());
    }
}
