pub mod bridge;
pub mod propagate;
pub mod registry;
pub mod validate;
