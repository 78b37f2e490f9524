pub mod chat;
pub mod plant;
