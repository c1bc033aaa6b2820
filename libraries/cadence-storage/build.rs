//! Build script for cadence-storage.
//!
//! Rebuilds the crate when database migrations change.

fn main() {
    // Trigger rebuild when migrations change
    println!("cargo:rerun-if-changed=migrations");
}
