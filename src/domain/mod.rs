// Domain layer: cart model and the ports the cart store talks through.

pub mod model;
pub mod ports;
