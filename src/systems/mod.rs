//! Systems: shapes and their collision handling

pub mod collision;
pub mod shapes;
