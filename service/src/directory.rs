//! Doctors directory component.
//!
//! The directory joins the doctors collection with the users' profile
//! images, narrows the result by a search query and serves it page by
//! page. Both collections are fetched whole and processed in memory.

use std::{collections::HashMap, fmt};

use derive_more::Display;
use smart_default::SmartDefault;

use crate::{
    domain::doctor,
    read::doctor::directory::{Enriched, ProfileImage, Record},
};
#[cfg(doc)]
use crate::{domain::Doctor, domain::User};

/// Doctors directory configuration.
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// Number of directory rows per page, when a request doesn't specify
    /// one.
    #[default = 5]
    pub default_per_page: usize,
}

/// Joins the provided directory [`Record`]s with the provided
/// [`ProfileImage`]s by the owning [`User`]'s ID.
///
/// A [`Record`] without a matching [`ProfileImage`] stays in the result
/// with no image. When several [`ProfileImage`]s share a [`User`] ID, the
/// first one in the provided order wins. Runs in `O(D + U)`.
#[must_use]
pub fn merge(records: Vec<Record>, images: &[ProfileImage]) -> Vec<Enriched> {
    let mut by_user = HashMap::with_capacity(images.len());
    for img in images {
        _ = by_user.entry(img.user_id).or_insert(&img.image_url);
    }

    records
        .into_iter()
        .map(|record| {
            let image_url =
                by_user.get(&record.user_id).map(|&url| url.clone());
            Enriched { record, image_url }
        })
        .collect()
}

/// Narrows the provided directory rows to the ones whose name contains the
/// provided `query`, case-insensitively.
///
/// [`None`] and an empty `query` match everything, preserving the input
/// order.
#[must_use]
pub fn filter(rows: Vec<Enriched>, query: Option<&str>) -> Vec<Enriched> {
    let needle = query.unwrap_or_default().to_lowercase();
    rows.into_iter()
        .filter(|row| {
            AsRef::<str>::as_ref(&row.record.name)
                .to_lowercase()
                .contains(&needle)
        })
        .collect()
}

/// Returns the message displayed when a search yields no rows.
#[must_use]
pub fn no_results_message(query: Option<&str>) -> String {
    format!("No doctors found for '{}'", query.unwrap_or_default())
}

pub mod load {
    //! Loading progress of the directory collections.
    //!
    //! The join of doctors with profile images is only possible once both
    //! collections have fully arrived, so the progress is tracked
    //! explicitly and [`Progress::merged`] is the single place producing
    //! the joined rows.

    use super::{merge, Enriched, ProfileImage, Record};

    /// State of the directory collections loading.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub enum State {
        /// Neither collection has arrived yet.
        LoadingBoth,

        /// Exactly one collection has arrived.
        LoadingOne,

        /// Both collections have arrived.
        Ready,
    }

    /// Tracker of the directory collections loading.
    #[derive(Debug, Default)]
    pub struct Progress {
        /// Directory [`Record`]s, once arrived.
        records: Option<Vec<Record>>,

        /// [`ProfileImage`]s, once arrived.
        images: Option<Vec<ProfileImage>>,
    }

    impl Progress {
        /// Returns the current [`State`] of this [`Progress`].
        #[must_use]
        pub fn state(&self) -> State {
            match (&self.records, &self.images) {
                (None, None) => State::LoadingBoth,
                (Some(_), None) | (None, Some(_)) => State::LoadingOne,
                (Some(_), Some(_)) => State::Ready,
            }
        }

        /// Feeds the arrived directory [`Record`]s into this [`Progress`].
        pub fn records_loaded(&mut self, records: Vec<Record>) {
            self.records = Some(records);
        }

        /// Feeds the arrived [`ProfileImage`]s into this [`Progress`].
        pub fn images_loaded(&mut self, images: Vec<ProfileImage>) {
            self.images = Some(images);
        }

        /// Joins the collections, returning [`None`] unless this
        /// [`Progress`] has reached [`State::Ready`].
        #[must_use]
        pub fn merged(self) -> Option<Vec<Enriched>> {
            match (self.records, self.images) {
                (Some(records), Some(images)) => {
                    Some(merge(records, &images))
                }
                (None, _) | (_, None) => None,
            }
        }
    }
}

/// Navigation target of the directory.
#[derive(Clone, Debug, Display)]
#[display("{}", self.path())]
pub enum Target {
    /// Doctors search screen with the provided query.
    Search {
        /// Search query to carry over.
        query: String,
    },

    /// Appointment request screen for the provided [`Doctor`].
    RequestAppointment {
        /// ID of the [`Doctor`] to request an appointment with.
        doctor_id: doctor::Id,
    },
}

impl Target {
    /// Returns the path (with the query string) of this [`Target`].
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Search { query } => {
                format!("/doctors?query={}", PercentEncoded(query))
            }
            Self::RequestAppointment { doctor_id } => format!(
                "/requestappointment?query={}",
                PercentEncoded(&doctor_id.to_string()),
            ),
        }
    }
}

/// String being percent-encoded as a URI component when displayed.
///
/// Alphanumerics and `-_.!~*'()` pass through, any other character is
/// encoded as the `%XX` form of its UTF-8 bytes.
struct PercentEncoded<'a>(&'a str);

impl fmt::Display for PercentEncoded<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0.bytes() {
            if b.is_ascii_alphanumeric()
                || matches!(b, b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')')
            {
                write!(f, "{}", char::from(b))?;
            } else {
                write!(f, "%{b:02X}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod spec {
    use common::pagination::{paginate, total_pages};

    use crate::domain::{doctor, user};
    use crate::read::doctor::directory::{Enriched, ProfileImage, Record};

    use super::{filter, load, merge, no_results_message, Target};

    fn record(name: &str, user_id: user::Id) -> Record {
        Record {
            id: doctor::Id::new(),
            name: user::Name::new(name).unwrap(),
            specialization: doctor::Specialization::Cardiology,
            work_location: doctor::Location::new("Main clinic").unwrap(),
            user_id,
        }
    }

    fn image(user_id: user::Id, url: &str) -> ProfileImage {
        ProfileImage {
            user_id,
            image_url: user::ImageUrl::new(url).unwrap(),
        }
    }

    fn names(rows: &[Enriched]) -> Vec<&str> {
        rows.iter().map(|r| r.record.name.as_ref()).collect()
    }

    #[test]
    fn merge_keeps_unmatched_rows_and_prefers_first_image() {
        let with_image = user::Id::new();
        let without_image = user::Id::new();
        let rows = merge(
            vec![record("Ada", with_image), record("Grace", without_image)],
            &[
                image(with_image, "https://img.example/first.png"),
                image(with_image, "https://img.example/second.png"),
            ],
        );

        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0].image_url.as_ref().map(AsRef::as_ref),
            Some("https://img.example/first.png"),
        );
        assert_eq!(rows[1].image_url, None);
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let rows = merge(
            vec![
                record("Dr. Ada Lovelace", user::Id::new()),
                record("Dr. Adam Smith", user::Id::new()),
                record("Dr. Grace Hopper", user::Id::new()),
            ],
            &[],
        );

        assert_eq!(
            names(&filter(rows.clone(), Some("ada"))),
            vec!["Dr. Ada Lovelace", "Dr. Adam Smith"],
        );
        assert_eq!(names(&filter(rows.clone(), Some("ADA"))).len(), 2);
        assert_eq!(filter(rows.clone(), Some("zzz")).len(), 0);
        // Empty and absent queries match everything.
        assert_eq!(filter(rows.clone(), Some("")).len(), 3);
        assert_eq!(filter(rows, None).len(), 3);
    }

    #[test]
    fn filtered_rows_paginate_consistently() {
        let rows = merge(
            (0..7)
                .map(|i| record(&format!("Doctor {i}"), user::Id::new()))
                .collect(),
            &[],
        );
        let filtered = filter(rows, Some("doctor"));

        assert_eq!(total_pages(filtered.len(), 5), 2);
        assert_eq!(paginate(&filtered, 1, 5).len(), 5);
        assert_eq!(paginate(&filtered, 2, 5).len(), 2);
    }

    #[test]
    fn empty_result_message_quotes_the_query() {
        assert_eq!(
            no_results_message(Some("zzz")),
            "No doctors found for 'zzz'",
        );
        assert_eq!(no_results_message(None), "No doctors found for ''");
    }

    #[test]
    fn progress_joins_only_when_both_collections_arrived() {
        let mut progress = load::Progress::default();
        assert_eq!(progress.state(), load::State::LoadingBoth);

        progress.records_loaded(vec![record("Ada", user::Id::new())]);
        assert_eq!(progress.state(), load::State::LoadingOne);

        progress.images_loaded(vec![]);
        assert_eq!(progress.state(), load::State::Ready);
        assert_eq!(progress.merged().unwrap().len(), 1);

        let mut one_sided = load::Progress::default();
        one_sided.images_loaded(vec![]);
        assert!(one_sided.merged().is_none());
    }

    #[test]
    fn targets_encode_their_query_component() {
        let target = Target::Search {
            query: "Dr. Ada & Co?".into(),
        };
        assert_eq!(target.path(), "/doctors?query=Dr.%20Ada%20%26%20Co%3F");

        let doctor_id = doctor::Id::new();
        let target = Target::RequestAppointment { doctor_id };
        assert_eq!(
            target.path(),
            format!("/requestappointment?query={doctor_id}"),
        );
    }
}
