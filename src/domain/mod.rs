// Domain layer: transaction records and the ports used to load them.

pub mod model;
pub mod ports;
