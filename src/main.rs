//! # Voxel Terrain Demo Entry Point
//!
//! Calls into the library's `run()` to generate and draw a small world headlessly.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release
//! ```

fn main() {
    voxel_terrain::run();
}
