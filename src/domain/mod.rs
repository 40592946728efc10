// Domain layer: note model, static tables and the ports the runner depends on.

pub mod model;
pub mod ports;
pub mod tables;
