pub mod init;
pub mod report;
pub mod session;
pub mod validate;
