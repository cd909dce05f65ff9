// Domain layer: plot rows, reconciled results and the ports the pipeline runs against.

pub mod model;
pub mod ports;
