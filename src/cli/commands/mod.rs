pub mod auth;
pub mod dump;
pub mod endpoints;
pub mod get;
pub mod users;

pub use auth::{AuthCommands, auth_command};
pub use dump::{DumpCommands, dump_command};
pub use endpoints::{EndpointsCommands, endpoints_command};
pub use get::{GetCommands, get_command};
pub use users::{UsersCommands, users_command};
