//! [`Command`] definition.

pub mod authorize_user_session;
pub mod create_user;
pub mod create_user_session;
pub mod request_appointment;
pub mod update_doctor_details;
pub mod update_user_image;
pub mod update_user_name;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    authorize_user_session::AuthorizeUserSession, create_user::CreateUser,
    create_user_session::CreateUserSession,
    request_appointment::RequestAppointment,
    update_doctor_details::UpdateDoctorDetails,
    update_user_image::UpdateUserImage, update_user_name::UpdateUserName,
};
