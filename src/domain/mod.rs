// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Storage and messaging live behind the traits in crate::gateways; nothing
// here knows which backend is wired in.
//
// ============================================================================

pub mod order;
