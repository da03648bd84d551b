pub mod crops;
pub mod detect;
pub mod health;
pub mod info;
