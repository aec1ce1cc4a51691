pub mod decision;
pub mod enrollment;
pub mod intake;
pub mod registration;

#[cfg(test)]
pub(crate) mod mem;
