// gridfeed-host library
// Static delivery of the grid page, its wasm bundle and startup config

// Configuration
pub mod config;

// Embedded UI assets (single-binary distribution)
pub mod embedded;

// HTTP routes
pub mod server;
