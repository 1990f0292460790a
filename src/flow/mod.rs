pub mod diagram;
pub mod viewport;
