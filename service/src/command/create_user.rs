//! [`Command`] for creating a new [`User`].

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use secrecy::{ExposeSecret, SecretBox};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::user::{Email, Name, Password};
use crate::{
    domain::{doctor, user, Doctor, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`User`].
///
/// A [`user::Role::Doctor`] account also receives its [`Doctor`] directory
/// entry, with a freshly generated [`doctor::Code`], in the same
/// transaction.
#[derive(Clone, Debug)]
pub struct CreateUser {
    /// [`Name`] of a new [`User`].
    pub name: user::Name,

    /// [`Email`] of a new [`User`], serving as the login.
    pub email: user::Email,

    /// [`Password`] of a new [`User`].
    pub password: SecretBox<user::Password>,

    /// [`user::Role`] of a new [`User`].
    pub role: user::Role,

    /// [`user::Age`] of a new [`User`].
    ///
    /// Required for patients.
    pub age: Option<user::Age>,

    /// [`user::Gender`] of a new [`User`].
    ///
    /// Required for patients.
    pub gender: Option<user::Gender>,

    /// [`doctor::Specialization`] of a new [`Doctor`].
    ///
    /// Required for doctors.
    pub specialization: Option<doctor::Specialization>,

    /// [`doctor::Location`] of a new [`Doctor`].
    ///
    /// Required for doctors.
    pub work_location: Option<doctor::Location>,
}

/// Output of [`CreateUser`] [`Command`].
#[derive(Clone, Debug)]
pub struct Output {
    /// Created [`User`].
    pub user: User,

    /// Created [`Doctor`] directory entry, for doctor accounts.
    pub doctor: Option<Doctor>,
}

impl<Db> Command<CreateUser> for Service<Db>
where
    Db: for<'e> Database<
            Select<By<Option<User>, &'e user::Email>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<User>, Err = Traced<database::Error>>
        + Database<Insert<Doctor>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateUser) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateUser {
            name,
            email,
            password,
            role,
            age,
            gender,
            specialization,
            work_location,
        } = cmd;

        let details = match role {
            user::Role::Doctor => {
                let specialization = specialization
                    .ok_or(E::NoDoctorDetails)
                    .map_err(tracerr::wrap!())?;
                let work_location = work_location
                    .ok_or(E::NoDoctorDetails)
                    .map_err(tracerr::wrap!())?;
                Some((specialization, work_location))
            }
            user::Role::Patient => {
                if age.is_none() || gender.is_none() {
                    return Err(tracerr::new!(E::NoPatientDetails));
                }
                None
            }
        };

        let u = self
            .database()
            .execute(Select(By::new(&email)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if u.is_some() {
            return Err(tracerr::new!(E::EmailOccupied(email)));
        }

        let user = User {
            id: user::Id::new(),
            name,
            email,
            password_hash: user::PasswordHash::new(password.expose_secret()),
            role,
            age,
            gender,
            image_url: None,
            created_at: DateTime::now().coerce(),
        };
        let doctor = details.map(|(specialization, work_location)| Doctor {
            id: doctor::Id::new(),
            name: user.name.clone(),
            specialization,
            work_location,
            user_id: user.id,
            code: doctor::Code::generate(),
            created_at: DateTime::now().coerce(),
        });

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(user.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        if let Some(doctor) = doctor.clone() {
            tx.execute(Insert(doctor))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;
        }
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(Output { user, doctor })
    }
}

/// Error of [`CreateUser`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`user::Email`] is already occupied.
    #[display("`{_0}` email is occupied")]
    EmailOccupied(#[error(not(source))] user::Email),

    /// Doctor account misses its specialization or work location.
    #[display("No specialization or work location provided")]
    NoDoctorDetails,

    /// Patient account misses its age or gender.
    #[display("No age or gender provided")]
    NoPatientDetails,
}
