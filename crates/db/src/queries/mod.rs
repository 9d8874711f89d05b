pub mod bookings;
pub mod catalog;
pub mod fare_history;
pub mod flights;
pub mod payments;
pub mod seats;
pub mod tickets;
pub mod users;
