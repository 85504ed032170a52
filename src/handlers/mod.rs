// handlers/mod.rs - route handlers
//
// Public: root, health and company reads.
// Basic auth (applied as a route layer in app.rs): company create/update/delete.

pub mod companies;
pub mod system;
