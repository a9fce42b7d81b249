pub mod editor;
pub mod functions;
pub mod model;
