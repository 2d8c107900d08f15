//! External service clients.

pub mod password;
pub mod vault;
