// handlers/students/mod.rs - Student record handlers

pub mod create; // POST /users
pub mod delete; // DELETE /users/:id
pub mod list;   // GET /users
pub mod search; // GET /users/search
pub mod show;   // GET /users/:id
pub mod update; // PUT /users/:id

pub use create::student_create;
pub use delete::student_delete;
pub use list::student_list;
pub use search::student_search;
pub use show::student_show;
pub use update::student_update;
