mod capture;
mod error;
mod location;
mod stack;

// Native capture side
pub use capture::current_frames;
pub use capture::CapturedError;
pub use capture::RawFrame;

// Errors
pub use error::Error;

// Locations
pub use location::ArtifactLocation;
pub use location::Location;
pub use location::LogicalLocation;
pub use location::PhysicalLocation;
pub use location::Region;

// SARIF stack objects
pub use stack::Message;
pub use stack::Stack;
pub use stack::StackFrame;
