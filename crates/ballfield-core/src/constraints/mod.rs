/// Sphere-sphere contact detection and impulse response.
pub mod contact;
