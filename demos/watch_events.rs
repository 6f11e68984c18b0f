//! Print keyboard events as they arrive.
//!
//! Run with: cargo run --example watch_events
//!
//! Note: On Linux, reading /dev/input requires membership in the
//! 'input' group.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use hidscan::{DeviceManager, Error};

fn main() {
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .expect("failed to install Ctrl+C handler");

    let manager = match DeviceManager::new() {
        Ok(manager) => manager,
        Err(e) => {
            eprintln!("Discovery failed: {e}");
            return;
        }
    };

    println!("hidscan watch_events example");
    println!("Press keys, Ctrl+C to exit\n");

    while running.load(Ordering::SeqCst) {
        match manager.get_key() {
            Ok(events) => {
                for event in events {
                    // Sync events separate hardware reports; skip them
                    // for readability.
                    if event.ev_type == "Sync" {
                        continue;
                    }
                    println!(
                        "[{}] {} {} = {}",
                        event.device, event.ev_type, event.code, event.state
                    );
                }
            }
            Err(Error::Unplugged(kind)) => {
                eprintln!("No {kind} attached");
                return;
            }
            Err(e) => {
                eprintln!("Read failed: {e}");
                return;
            }
        }
    }
}
