pub mod capacity;
pub mod hide;
pub mod unveil;
pub mod unveil_raw;
