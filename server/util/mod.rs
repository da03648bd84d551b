pub mod body;
pub mod payload;
