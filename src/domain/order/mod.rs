// ============================================================================
// Order Domain - Business Logic for the Order Aggregate
// ============================================================================
//
// - Value objects (OrderedItem, OrderStatus)
// - Commands (NewOrder, UpdateOrder)
// - Errors (OrderError)
// - Aggregate (Order with pure transitions)
// - Use-case (OrderUseCase, the only writer of orders)
//
// ============================================================================

pub mod value_objects;
pub mod commands;
pub mod errors;
pub mod aggregate;
pub mod use_case;

pub use value_objects::*;
pub use commands::*;
pub use errors::*;
pub use aggregate::*;
pub use use_case::*;
