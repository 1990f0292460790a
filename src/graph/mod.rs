pub mod points;
pub mod lattice;
pub mod curve_path;
pub mod editor;
pub mod selection;
