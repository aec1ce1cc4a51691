pub mod storers;
pub mod tokener;
