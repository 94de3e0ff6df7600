pub mod constants;
pub mod element_ids;

pub use constants::*;
pub use element_ids::ElementIdGenerator;
