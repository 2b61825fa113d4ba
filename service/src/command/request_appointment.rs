//! [`Command`] for requesting an appointment with a [`Doctor`].

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{appointment, doctor, user, AppointmentRequest, Doctor},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for requesting an appointment with a [`Doctor`].
#[derive(Clone, Debug)]
pub struct RequestAppointment {
    /// ID of the [`Doctor`] the appointment is requested with.
    pub doctor_id: doctor::Id,

    /// Desired date and time of the appointment.
    pub requested_on: appointment::RequestDateTime,

    /// Free-form [`appointment::Notes`] for the [`Doctor`].
    pub notes: Option<appointment::Notes>,

    /// Name of the requesting patient.
    pub patient_name: user::Name,

    /// Email of the requesting patient.
    pub patient_email: user::Email,

    /// Phone of the requesting patient.
    pub patient_phone: user::Phone,

    /// Whether the patient confirmed the request details.
    pub confirmed: bool,
}

impl<Db> Command<RequestAppointment> for Service<Db>
where
    Db: Database<
            Select<By<Option<Doctor>, doctor::Id>>,
            Ok = Option<Doctor>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Insert<AppointmentRequest>,
            Err = Traced<database::Error>,
        > + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = AppointmentRequest;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: RequestAppointment,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RequestAppointment {
            doctor_id,
            requested_on,
            notes,
            patient_name,
            patient_email,
            patient_phone,
            confirmed,
        } = cmd;

        if !confirmed {
            return Err(tracerr::new!(E::ConfirmationRequired));
        }

        drop(
            self.database()
                .execute(Select(By::new(doctor_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::DoctorNotExists(doctor_id))
                .map_err(tracerr::wrap!())?,
        );

        let request = AppointmentRequest {
            id: appointment::Id::new(),
            doctor_id,
            requested_on,
            notes,
            patient_name,
            patient_email,
            patient_phone,
            confirmed,
            created_at: DateTime::now().coerce(),
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(request.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(request)
    }
}

/// Error of [`RequestAppointment`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Patient didn't confirm the request details.
    #[display("Appointment request is not confirmed")]
    ConfirmationRequired,

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Doctor`] with the provided ID does not exist.
    #[display("`Doctor(id: {_0})` does not exist")]
    #[from(ignore)]
    DoctorNotExists(#[error(not(source))] doctor::Id),
}

#[cfg(test)]
mod spec {
    use crate::domain::doctor;

    use super::ExecutionError;

    #[test]
    fn execution_errors_render_balanced_ids() {
        let id = doctor::Id::new();

        assert_eq!(
            ExecutionError::DoctorNotExists(id).to_string(),
            format!("`Doctor(id: {id})` does not exist"),
        );
        assert_eq!(
            ExecutionError::ConfirmationRequired.to_string(),
            "Appointment request is not confirmed",
        );
    }
}
