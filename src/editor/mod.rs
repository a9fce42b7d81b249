pub mod events;
pub mod ports;
pub mod repair;
pub mod session;
