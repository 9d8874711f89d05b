pub mod booking;
pub mod catalog;
pub mod fare_history;
pub mod flight;
pub mod payment;
pub mod seat;
pub mod ticket;
pub mod user;

pub use booking::Booking;
pub use catalog::{Aircraft, Airline, Airport};
pub use fare_history::FareHistorySample;
pub use flight::Flight;
pub use payment::Payment;
pub use seat::{Seat, SeatClassCount};
pub use ticket::{Ticket, TicketDetail};
pub use user::User;
