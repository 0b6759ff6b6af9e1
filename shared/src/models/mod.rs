//! Domain models
//!
//! Persisted entities and the static menu catalog types. Row derives for
//! the persisted entities live behind the `db` feature so client crates
//! can use the models without pulling in `sqlx`.

pub mod conversation;
pub mod menu;
pub mod order;
pub mod reservation;
pub mod session;

// Re-exports
pub use conversation::{ConversationTurn, MessageType, NewConversationTurn};
pub use menu::{MenuCatalog, MenuItem, RestaurantHours, RestaurantInfo};
pub use order::{NewOrder, Order, OrderLineItem, OrderStatus};
pub use reservation::{NewReservation, Reservation, ReservationStatus};
pub use session::UserSession;
