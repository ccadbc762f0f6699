pub mod bundle;
pub mod completion;
pub mod init;
pub mod punct;
pub mod table;
