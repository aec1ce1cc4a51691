pub mod repository;
pub mod storer;
pub mod tokener;
