pub mod demand;
pub mod solar;
