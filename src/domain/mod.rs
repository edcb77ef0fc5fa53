// Domain layer: the data document, entry shapes and ports. No I/O here.

pub mod model;
pub mod ports;
