//! Domain models for frontdesk-service.

mod client;
mod invoice;
mod payment;
mod reservation;
mod room;
mod user;

pub use client::{Client, CreateClient, UpdateClient};
pub use invoice::{stay_nights, stay_total, Invoice, InvoiceStatus};
pub use payment::{CreatePayment, Payment, PaymentMethod};
pub use reservation::{
    validate_booking, BookingCandidate, BookingError, CreateReservation, ListReservationsFilter,
    Reservation, ReservationStatus, UpdateReservation,
};
pub use room::{
    occupancy_transition, CreateRoom, ListRoomsFilter, Room, RoomCategory, RoomStatus, UpdateRoom,
};
pub use user::{CreateUser, User, UserRole};
