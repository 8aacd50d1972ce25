// handlers/mod.rs - HTTP handlers
//
// Handlers only translate between HTTP and the student service; every
// failure goes through `ApiError` so status codes and bodies stay uniform.

pub mod health;   // GET /health
pub mod students; // /users and /users/:id

pub use health::health;
