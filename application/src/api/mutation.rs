//! GraphQL [`Mutation`]s definitions.

use common::DateTime;
use juniper::graphql_object;
use service::{command, domain, Command as _};

use crate::{api, define_error, AsError, Context, Error, Session};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Creates a new `User` account and signs it in.
    ///
    /// Doctor accounts require a specialization and a work location, patient
    /// accounts require an age and a gender.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `EMAIL_OCCUPIED` - provided `UserEmail` is occupied by another
    ///                      `User`;
    /// - `NO_DOCTOR_DETAILS` - a doctor account misses its specialization or
    ///                         work location;
    /// - `NO_PATIENT_DETAILS` - a patient account misses its age or gender;
    /// - `INVALID_AGE` - provided age is out of the sensible range.
    #[tracing::instrument(
        skip_all,
        fields(
            age = ?age,
            email = %email,
            gender = ?gender,
            gql.name = "createUser",
            name = %name,
            otel.name = Self::SPAN_NAME,
            role = ?role,
            specialization = ?specialization,
            work_location = ?work_location.as_ref().map(ToString::to_string),
        ),
    )]
    #[expect(clippy::too_many_arguments, reason = "still readable")]
    pub async fn create_user(
        name: api::user::Name,
        email: api::user::Email,
        password: api::user::Password,
        role: api::user::Role,
        age: Option<i32>,
        gender: Option<api::user::Gender>,
        specialization: Option<api::doctor::Specialization>,
        work_location: Option<api::doctor::Location>,
        ctx: &Context,
    ) -> Result<api::user::session::CreateResult, Error> {
        let age = age
            .map(|a| {
                i16::try_from(a)
                    .ok()
                    .and_then(domain::user::Age::new)
                    .ok_or_else(|| Error::from(InputError::InvalidAge))
            })
            .transpose()
            .map_err(ctx.error())?;

        let user = ctx
            .service()
            .execute(command::CreateUser {
                name: name.into(),
                email: email.into(),
                password: secrecy::SecretBox::init_with(move || {
                    password.into()
                }),
                role: role.into(),
                age,
                gender: gender.map(Into::into),
                specialization: specialization.map(Into::into),
                work_location: work_location.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .user;
        let output = ctx
            .service()
            .execute(command::CreateUserSession::ByUserId(user.id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        ctx.set_current_session(Session {
            user_id: output.user.id.into(),
            token: output.token.clone(),
            expires_at: output.expires_at.coerce(),
        })
        .await;

        Ok(output.into())
    }

    /// Creates a new `UserSession` with the provided credentials.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `WRONG_CREDENTIALS` - provided credentials does not match any `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            email = %email,
            gql.name = "createUserSession",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_user_session(
        email: api::user::Email,
        password: api::user::Password,
        ctx: &Context,
    ) -> Result<api::user::session::CreateResult, Error> {
        let output = ctx
            .service()
            .execute(command::CreateUserSession::ByCredentials {
                email: email.into(),
                password: secrecy::SecretBox::init_with(move || {
                    password.into()
                }),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        ctx.set_current_session(Session {
            user_id: output.user.id.into(),
            token: output.token.clone(),
            expires_at: output.expires_at.coerce(),
        })
        .await;

        Ok(output.into())
    }

    /// Updates the `User`'s name to the provided one.
    ///
    /// Keeps the name of the `User`'s `Doctor` directory entry in sync.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateUserName",
            name = %name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_user_name(
        name: api::user::Name,
        ctx: &Context,
    ) -> Result<api::User, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::UpdateUserName {
                user_id: my_id.into(),
                name: name.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Updates the `User`'s profile image to the provided one, or removes it.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateUserImage",
            image_url = ?image_url,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_user_image(
        image_url: Option<api::user::ImageUrl>,
        ctx: &Context,
    ) -> Result<api::User, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::UpdateUserImage {
                user_id: my_id.into(),
                image_url: image_url.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Updates the `Doctor` directory details of the current `User`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_A_DOCTOR` - the current `User` owns no `Doctor` directory
    ///                    entry.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateDoctorDetails",
            otel.name = Self::SPAN_NAME,
            specialization = ?specialization,
            work_location = ?work_location.as_ref().map(ToString::to_string),
        ),
    )]
    pub async fn update_doctor_details(
        specialization: Option<api::doctor::Specialization>,
        work_location: Option<api::doctor::Location>,
        ctx: &Context,
    ) -> Result<api::Doctor, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::UpdateDoctorDetails {
                user_id: my_id.into(),
                specialization: specialization.map(Into::into),
                work_location: work_location.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Requests an appointment with the `Doctor`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `CONFIRMATION_REQUIRED` - the request details are not confirmed;
    /// - `DOCTOR_NOT_EXISTS` - the `Doctor` with the provided ID does not
    ///                         exist.
    #[tracing::instrument(
        skip_all,
        fields(
            confirmed = %confirmed,
            doctor_id = %doctor_id,
            gql.name = "requestAppointment",
            otel.name = Self::SPAN_NAME,
            requested_on = ?requested_on.to_rfc3339(),
        ),
    )]
    pub async fn request_appointment(
        doctor_id: api::doctor::Id,
        requested_on: DateTime,
        notes: Option<api::appointment::Notes>,
        patient_name: api::user::Name,
        patient_email: api::user::Email,
        patient_phone: api::user::Phone,
        confirmed: bool,
        ctx: &Context,
    ) -> Result<api::Appointment, Error> {
        ctx.service()
            .execute(command::RequestAppointment {
                doctor_id: doctor_id.into(),
                requested_on: requested_on.coerce(),
                notes: notes.map(Into::into),
                patient_name: patient_name.into(),
                patient_email: patient_email.into(),
                patient_phone: patient_phone.into(),
                confirmed,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}

define_error! {
    enum InputError {
        #[code = "INVALID_AGE"]
        #[status = BAD_REQUEST]
        #[message = "Provided age is out of the sensible range"]
        InvalidAge,
    }
}

impl AsError for command::create_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "EMAIL_OCCUPIED"]
                #[status = CONFLICT]
                #[message = "`UserEmail` is occupied by another `User`"]
                EmailOccupied,

                #[code = "NO_DOCTOR_DETAILS"]
                #[status = BAD_REQUEST]
                #[message = "Both specialization and work location must be \
                             provided for a doctor account"]
                NoDoctorDetails,

                #[code = "NO_PATIENT_DETAILS"]
                #[status = BAD_REQUEST]
                #[message = "Both age and gender must be provided for a \
                             patient account"]
                NoPatientDetails,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::EmailOccupied(_) => Some(Error::EmailOccupied.into()),
            Self::NoDoctorDetails => Some(Error::NoDoctorDetails.into()),
            Self::NoPatientDetails => Some(Error::NoPatientDetails.into()),
        }
    }
}

impl AsError for command::create_user_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "WRONG_CREDENTIALS"]
                #[status = FORBIDDEN]
                #[message = "Provided credentials does not match any `User`"]
                WrongCredentials,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::JsonWebTokenEncodeError(_) => None,
            Self::UserNotExists(_) | Self::WrongCredentials => {
                Some(Error::WrongCredentials.into())
            }
        }
    }
}

impl AsError for command::update_user_name::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::UserNotExists(_) => None,
        }
    }
}

impl AsError for command::update_user_image::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::UserNotExists(_) => None,
        }
    }
}

impl AsError for command::update_doctor_details::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotADoctor(_) => Some(api::PrivilegeError::Doctor.into()),
        }
    }
}

impl AsError for command::request_appointment::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "CONFIRMATION_REQUIRED"]
                #[status = BAD_REQUEST]
                #[message = "Appointment request details must be confirmed"]
                ConfirmationRequired,

                #[code = "DOCTOR_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Doctor` with the provided ID does not exist"]
                DoctorNotExists,
            }
        }

        match self {
            Self::ConfirmationRequired => {
                Some(Error::ConfirmationRequired.into())
            }
            Self::Db(e) => e.try_as_error(),
            Self::DoctorNotExists(_) => Some(Error::DoctorNotExists.into()),
        }
    }
}
