//! [`Doctor`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{doctor, user, Doctor},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read::doctor::directory,
};

/// Restores a [`Doctor`] from the provided [`Row`].
fn doctor_from_row(row: &Row) -> Doctor {
    Doctor {
        id: row.get("id"),
        name: row.get("name"),
        specialization: row.get("specialization"),
        work_location: row.get("work_location"),
        user_id: row.get("user_id"),
        code: row.get("code"),
        created_at: row.get("created_at"),
    }
}

/// Columns restoring a whole [`Doctor`].
const COLUMNS: &str = "id, name, specialization, work_location, \
                       user_id, code, created_at";

impl<C> Database<Select<By<Option<Doctor>, doctor::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Doctor>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Doctor>, doctor::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM doctors \
             WHERE id = $1::UUID \
             LIMIT 1",
        );
        Ok(self
            .query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(doctor_from_row))
    }
}

impl<C> Database<Select<By<Option<Doctor>, user::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Doctor>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Doctor>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let user_id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM doctors \
             WHERE user_id = $1::UUID \
             LIMIT 1",
        );
        Ok(self
            .query_opt(&sql, &[&user_id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(doctor_from_row))
    }
}

impl<C> Database<Insert<Doctor>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Doctor>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(doctor): Insert<Doctor>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(doctor))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Doctor>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(doctor): Update<Doctor>,
    ) -> Result<Self::Ok, Self::Err> {
        let Doctor {
            id,
            name,
            specialization,
            work_location,
            user_id,
            code,
            created_at,
        } = doctor;

        const SQL: &str = "\
            INSERT INTO doctors (\
                id, name, \
                specialization, work_location, \
                user_id, code, created_at\
            ) \
            VALUES (\
                $1::UUID, \
                $2::VARCHAR, \
                $3::INT2, $4::VARCHAR, \
                $5::UUID, $6::VARCHAR, $7::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET name = EXCLUDED.name, \
                specialization = EXCLUDED.specialization, \
                work_location = EXCLUDED.work_location, \
                user_id = EXCLUDED.user_id, \
                code = EXCLUDED.code, \
                created_at = EXCLUDED.created_at";
        self.exec(
            SQL,
            &[
                &id,
                &name,
                &specialization,
                &work_location,
                &user_id,
                &code,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Select<By<Vec<directory::Record>, directory::All>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<directory::Record>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<Vec<directory::Record>, directory::All>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, name, specialization, work_location, user_id \
            FROM doctors \
            ORDER BY created_at, id";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| directory::Record {
                id: row.get("id"),
                name: row.get("name"),
                specialization: row.get("specialization"),
                work_location: row.get("work_location"),
                user_id: row.get("user_id"),
            })
            .collect())
    }
}
