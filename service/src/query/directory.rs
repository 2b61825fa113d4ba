//! [`Query`] searching the doctors directory.

use common::{
    operations::{By, Select},
    pagination,
};
use derive_more::{Display, Error};
use tracerr::Traced;
use tracing as log;

use crate::{
    directory,
    infra::{database, Database},
    read::doctor::directory::{All, Page, ProfileImage, Record},
    Service,
};

use super::{doctors, users, Query};

/// [`Query`] searching the doctors directory.
///
/// Fetches the doctors and profile images collections concurrently, joins
/// them, narrows the result by the [`Search::query`] and returns the
/// requested [`Page`]. A collection failing to load degrades to an empty
/// one for this request, so a search never fails on store errors.
#[derive(Clone, Debug, Default)]
pub struct Search {
    /// Query matching doctors by name, case-insensitively.
    pub query: Option<String>,

    /// Number of the requested [`Page`].
    pub page: Option<i32>,

    /// Number of rows per [`Page`].
    pub per_page: Option<i32>,
}

impl<Db> Query<Search> for Service<Db>
where
    Db: Database<
            Select<By<Vec<Record>, All>>,
            Ok = Vec<Record>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<ProfileImage>, All>>,
            Ok = Vec<ProfileImage>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Page;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, q: Search) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let Search {
            query,
            page,
            per_page,
        } = q;

        let args = pagination::Arguments::new(
            page,
            per_page,
            self.config().directory.default_per_page,
        )
        .ok_or_else(|| {
            tracerr::new!(E::InvalidPagination { page, per_page })
        })?;

        let (records, images) = futures::join!(
            self.execute(doctors::All::by(All)),
            self.execute(users::ProfileImages::by(All)),
        );

        let mut progress = directory::load::Progress::default();
        progress.records_loaded(records.unwrap_or_else(|e| {
            log::error!("failed to load the doctors collection: {e}");
            Vec::new()
        }));
        progress.images_loaded(images.unwrap_or_else(|e| {
            log::error!("failed to load the profile images: {e}");
            Vec::new()
        }));

        let rows = progress.merged().unwrap_or_default();
        Ok(Page::new(&args, directory::filter(rows, query.as_deref())))
    }
}

/// Error of [`Search`] [`Query`] execution.
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum ExecutionError {
    /// Provided pagination arguments are not positive numbers.
    #[display(
        "Invalid pagination arguments: page: {page:?}, perPage: {per_page:?}"
    )]
    InvalidPagination {
        /// Requested page number.
        page: Option<i32>,

        /// Requested page size.
        per_page: Option<i32>,
    },
}

#[cfg(test)]
mod spec {
    use std::time;

    use common::operations::{By, Select};
    use futures::executor::block_on;
    use tracerr::Traced;

    use crate::{
        domain::{doctor, user},
        infra::database::{self, postgres, Database},
        read::doctor::directory::{All, ProfileImage, Record},
        task, Config, Query as _, Service,
    };

    use super::{ExecutionError, Search};

    /// In-memory store failing the configured collection reads.
    #[derive(Clone, Copy, Debug)]
    struct FlakyStore {
        records_fail: bool,
        images_fail: bool,
    }

    impl Database<Select<By<Vec<Record>, All>>> for FlakyStore {
        type Ok = Vec<Record>;
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            _: Select<By<Vec<Record>, All>>,
        ) -> Result<Self::Ok, Self::Err> {
            if self.records_fail {
                return Err(store_error());
            }
            Ok(vec![record("Dr. Ada Lovelace"), record("Dr. Grace Hopper")])
        }
    }

    impl Database<Select<By<Vec<ProfileImage>, All>>> for FlakyStore {
        type Ok = Vec<ProfileImage>;
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            _: Select<By<Vec<ProfileImage>, All>>,
        ) -> Result<Self::Ok, Self::Err> {
            if self.images_fail {
                return Err(store_error());
            }
            Ok(vec![])
        }
    }

    fn store_error() -> Traced<database::Error> {
        tracerr::new!(database::Error::Postgres(postgres::Error::PoolError(
            postgres::connection::PoolError::Closed,
        )))
    }

    fn record(name: &str) -> Record {
        Record {
            id: doctor::Id::new(),
            name: user::Name::new(name).unwrap(),
            specialization: doctor::Specialization::Cardiology,
            work_location: doctor::Location::new("Main clinic").unwrap(),
            user_id: user::Id::new(),
        }
    }

    fn service(database: FlakyStore) -> Service<FlakyStore> {
        Service {
            config: Config {
                jwt_encoding_key: jsonwebtoken::EncodingKey::from_secret(
                    b"secret",
                ),
                jwt_decoding_key: jsonwebtoken::DecodingKey::from_secret(
                    b"secret",
                ),
                directory: crate::directory::Config::default(),
                clean_expired_appointments:
                    task::clean_expired_appointments::Config {
                        interval: time::Duration::from_secs(60 * 60),
                        timeout: time::Duration::from_secs(60 * 60 * 24),
                    },
            },
            database,
        }
    }

    #[test]
    fn failed_doctors_read_degrades_to_an_empty_page() {
        let svc = service(FlakyStore {
            records_fail: true,
            images_fail: false,
        });

        let page = block_on(svc.execute(Search::default())).unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 0);
        assert_eq!(page.current_page, 1);
    }

    #[test]
    fn failed_images_read_keeps_doctors_without_images() {
        let svc = service(FlakyStore {
            records_fail: false,
            images_fail: true,
        });

        let page = block_on(svc.execute(Search::default())).unwrap();

        assert_eq!(page.items.len(), 2);
        assert!(page.items.iter().all(|row| row.image_url.is_none()));
    }

    #[test]
    fn healthy_reads_produce_the_narrowed_page() {
        let svc = service(FlakyStore {
            records_fail: false,
            images_fail: false,
        });

        let page = block_on(svc.execute(Search {
            query: Some("ada".into()),
            page: None,
            per_page: None,
        }))
        .unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(
            AsRef::<str>::as_ref(&page.items[0].record.name),
            "Dr. Ada Lovelace",
        );
        assert_eq!(page.total_count, 1);
    }

    #[test]
    fn non_positive_pagination_is_rejected() {
        let svc = service(FlakyStore {
            records_fail: false,
            images_fail: false,
        });

        let err = block_on(svc.execute(Search {
            query: None,
            page: Some(0),
            per_page: None,
        }))
        .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::InvalidPagination { page: Some(0), .. }
        ));
    }
}
