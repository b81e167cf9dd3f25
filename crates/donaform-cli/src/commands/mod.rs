pub mod init;
pub mod replay;
pub mod submit;
pub mod validate;
