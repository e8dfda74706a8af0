pub mod gate;
pub mod quota;
pub mod resolver;
pub mod workflow;
