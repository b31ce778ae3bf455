// Domain layer: the three entity kinds and the handles that link them.
// All cross-entity wiring goes through core::catalog; entities never hold
// direct references to each other.

pub mod model;
