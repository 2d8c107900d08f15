//! Database layer: connect-string construction, the Oracle statement
//! executor, stored procedure calls, and result formatting.

pub mod connection;
pub mod formatter;
pub mod oracle;
pub mod procedure;
