pub mod errors;
pub mod model;
pub mod order;
pub mod ports;
pub mod report;
