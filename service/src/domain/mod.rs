//! Domain entities definitions.

pub mod appointment;
pub mod doctor;
pub mod user;

pub use self::{
    appointment::AppointmentRequest, doctor::Doctor, user::User,
};
