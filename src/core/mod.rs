//! Core math and bookkeeping shared by every system

#[macro_use]
pub mod utils {
    #[macro_use]
    pub mod logging;
}
pub mod union_find;
pub mod vector;

pub use union_find::UnionFind;
pub use vector::Vector;
