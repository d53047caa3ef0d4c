// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) uses these modules to implement the interactive CLI.
//
// Module responsibilities:
// - `store`: The credential store — a flat CSV file of user accounts
//   loaded into memory, with register / login-check / password-reset
//   operations that rewrite the file on every mutation.
// - `password`: Password policy validation and SHA-256 digest helpers
//   used by the store.
// - `api`: Encapsulates the HTTP interaction with the Open Library
//   search endpoint (one blocking GET plus JSON decoding).
// - `ui`: Implements the terminal-based user interface flows and
//   delegates to `store` and `api`.
//
// Keeping this separation makes it easier to test the store and API
// logic or replace the UI in the future.
pub mod api;
pub mod password;
pub mod store;
pub mod ui;
