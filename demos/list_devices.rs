//! List every discovered input device.
//!
//! Run with: cargo run --example list_devices

use hidscan::DeviceManager;

fn main() {
    let manager = match DeviceManager::new() {
        Ok(manager) => manager,
        Err(e) => {
            eprintln!("Discovery failed: {e}");
            return;
        }
    };

    println!("Discovered {} device(s) on {:?}\n", manager.len(), manager.platform());

    for (index, device) in manager.iter().enumerate() {
        print!("[{index}] {}: {}", device.kind(), device.identity());
        if let Some(char_name) = device.char_name() {
            print!(" ({char_name})");
        }
        println!();
    }

    if manager.is_empty() {
        println!("No input devices found. On Linux, check that you're in the 'input' group.");
    }
}
