//! [`Command`] for updating a [`Doctor`]'s directory details.

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{doctor, user, Doctor, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating a [`Doctor`]'s directory details.
#[derive(Clone, Debug, From)]
pub struct UpdateDoctorDetails {
    /// ID of the [`User`] owning the [`Doctor`] entry.
    pub user_id: user::Id,

    /// New [`doctor::Specialization`], if it should change.
    pub specialization: Option<doctor::Specialization>,

    /// New [`doctor::Location`], if it should change.
    pub work_location: Option<doctor::Location>,
}

impl<Db> Command<UpdateDoctorDetails> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Doctor>, user::Id>>,
            Ok = Option<Doctor>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<User, user::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Update<Doctor>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Doctor;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateDoctorDetails,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateDoctorDetails {
            user_id,
            specialization,
            work_location,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `User`.
        tx.execute(Lock(By::new(user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut doctor = tx
            .execute(Select(By::<Option<Doctor>, _>::new(user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::NotADoctor(user_id))
            .map_err(tracerr::wrap!())?;

        if let Some(specialization) = specialization {
            doctor.specialization = specialization;
        }
        if let Some(work_location) = work_location {
            doctor.work_location = work_location;
        }
        tx.execute(Update(doctor.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(doctor)
    }
}

/// Error of [`UpdateDoctorDetails`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`User`] owns no [`Doctor`] directory entry.
    #[display("`User(id: {_0})` is not a doctor")]
    #[from(ignore)]
    NotADoctor(#[error(not(source))] user::Id),
}
