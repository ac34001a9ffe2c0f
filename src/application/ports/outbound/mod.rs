//! Outbound ports - Interfaces that the application requires from external systems

mod authorization_port;
mod clock_port;
mod image_port;
mod repository_port;

pub use authorization_port::{AccessDenied, Action, AuthorizationPort};
#[cfg(test)]
pub use clock_port::MockClockPort;
pub use clock_port::ClockPort;
#[cfg(test)]
pub use image_port::MockImageLibraryPort;
pub use image_port::ImageLibraryPort;
pub use repository_port::{CharacterRepositoryPort, PlayerRepositoryPort};
