pub mod errors;
pub mod gate;

pub use errors::KeyLoadError;
pub use gate::TransportGate;
