// In-process event distribution between the rivalry services.
//
// Stored matches are announced per table; listeners recompute whatever they
// derive from the match history instead of patching it.

// Public API - what other modules can use
pub use bus::EventBus;
pub use events::RivalryEvent;

// Internal modules
mod bus;
mod events;
