//! [`Command`] for loading demo fixtures into an empty storage.

use std::time::Duration;

use common::{
    operations::{All, By, Insert, Select},
    DateTime, DateTimeOf,
};
use rust_decimal::Decimal;
use tracerr::Traced;

use crate::{
    domain::{owner, property, Owner, Property},
    infra::{database, Database},
    read,
    Service,
};

use super::Command;

/// [`Command`] for loading demo [`Owner`]s, [`Property`]s, and their images
/// and traces.
///
/// Does nothing if any [`Owner`] is stored already.
#[derive(Clone, Copy, Debug, Default)]
pub struct SeedSampleData;

/// Outcome of [`SeedSampleData`] [`Command`] execution.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// Fixtures were inserted.
    Seeded(Counts),

    /// Storage already contained data, so nothing was inserted.
    Skipped,
}

/// Numbers of inserted fixtures.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Counts {
    /// Number of inserted [`Owner`]s.
    pub owners: usize,

    /// Number of inserted [`Property`]s.
    pub properties: usize,

    /// Number of inserted [`property::Image`]s.
    pub images: usize,

    /// Number of inserted [`property::Trace`]s.
    pub traces: usize,
}

impl<Db> Command<SeedSampleData> for Service<Db>
where
    Db: Database<
            Select<By<read::owner::TotalCount, All>>,
            Ok = read::owner::TotalCount,
            Err = Traced<database::Error>,
        > + Database<Insert<Owner>, Ok = (), Err = Traced<database::Error>>
        + Database<Insert<Property>, Ok = (), Err = Traced<database::Error>>
        + Database<
            Insert<property::Image>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Insert<property::Trace>,
            Ok = (),
            Err = Traced<database::Error>,
        >,
{
    type Ok = Outcome;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, _: SeedSampleData) -> Result<Self::Ok, Self::Err> {
        let existing: u64 = self
            .database()
            .execute(Select(By::<read::owner::TotalCount, _>::new(All)))
            .await
            .map_err(tracerr::wrap!())?
            .into();
        if existing > 0 {
            tracing::info!("sample data already exists, skipping seeding");
            return Ok(Outcome::Skipped);
        }

        tracing::info!("seeding sample data");

        let now = DateTime::now();
        // Spread creation dates, so the listing order follows the fixtures.
        let created_at = |n: usize| {
            let offset = Duration::from_millis(u64::try_from(n).unwrap_or(0));
            now.checked_add(offset).unwrap_or(now)
        };

        let owners = owners(created_at);
        for owner in &owners {
            self.database()
                .execute(Insert(owner.clone()))
                .await
                .map_err(tracerr::wrap!())?;
        }
        let properties = properties(created_at);
        for property in &properties {
            self.database()
                .execute(Insert(property.clone()))
                .await
                .map_err(tracerr::wrap!())?;
        }
        let images = images();
        for image in &images {
            self.database()
                .execute(Insert(image.clone()))
                .await
                .map_err(tracerr::wrap!())?;
        }
        let traces = traces();
        for trace in &traces {
            self.database()
                .execute(Insert(trace.clone()))
                .await
                .map_err(tracerr::wrap!())?;
        }

        let counts = Counts {
            owners: owners.len(),
            properties: properties.len(),
            images: images.len(),
            traces: traces.len(),
        };
        tracing::info!(
            owners = counts.owners,
            properties = counts.properties,
            images = counts.images,
            traces = counts.traces,
            "sample data seeded",
        );

        Ok(Outcome::Seeded(counts))
    }
}

/// Error of [`SeedSampleData`] [`Command`] execution.
pub type ExecutionError = database::Error;

/// Builds a fixture date.
fn date<Of: ?Sized>(year: i32, month: u8, day: u8) -> DateTimeOf<Of> {
    DateTimeOf::from_date(year, month, day).expect("valid fixture date")
}

/// Builds fixture [`Owner`]s.
fn owners(created_at: impl Fn(usize) -> DateTime) -> Vec<Owner> {
    [
        (
            "OWNER001",
            "John Smith",
            "123 Main Street, New York, NY 10001",
            "JS",
            (1980, 5, 15),
        ),
        (
            "OWNER002",
            "Sarah Johnson",
            "456 Oak Avenue, Los Angeles, CA 90210",
            "SJ",
            (1975, 8, 22),
        ),
        (
            "OWNER003",
            "Michael Brown",
            "789 Pine Road, Chicago, IL 60601",
            "MB",
            (1985, 12, 3),
        ),
        (
            "OWNER004",
            "Emily Davis",
            "321 Elm Street, Miami, FL 33101",
            "ED",
            (1990, 3, 18),
        ),
    ]
    .into_iter()
    .enumerate()
    .map(|(n, (id_owner, name, address, initials, (y, m, d)))| Owner {
        id: owner::Id::new(),
        id_owner: id_owner.into(),
        name: name.into(),
        address: address.into(),
        photo: Some(format!(
            "https://via.placeholder.com/150x150?text={initials}",
        )),
        birthday: date(y, m, d),
        created_at: created_at(n).coerce(),
        updated_at: created_at(n).coerce(),
    })
    .collect()
}

/// Builds fixture [`Property`]s.
fn properties(created_at: impl Fn(usize) -> DateTime) -> Vec<Property> {
    [
        (
            "PROP001",
            "Luxury Downtown Apartment",
            "100 Central Park West, New York, NY 10023",
            2_500_000,
            "NYC001",
            2020,
            "OWNER001",
        ),
        (
            "PROP002",
            "Modern Beach House",
            "500 Ocean Drive, Miami Beach, FL 33139",
            1_800_000,
            "MIA001",
            2019,
            "OWNER004",
        ),
        (
            "PROP003",
            "Victorian Family Home",
            "200 Maple Street, San Francisco, CA 94102",
            3_200_000,
            "SF001",
            1905,
            "OWNER002",
        ),
        (
            "PROP004",
            "Contemporary Loft",
            "150 Industrial Way, Chicago, IL 60622",
            850_000,
            "CHI001",
            2018,
            "OWNER003",
        ),
        (
            "PROP005",
            "Suburban Ranch House",
            "75 Willow Lane, Austin, TX 78701",
            650_000,
            "AUS001",
            2015,
            "OWNER001",
        ),
        (
            "PROP006",
            "Penthouse Suite",
            "888 Skyline Boulevard, Seattle, WA 98101",
            4_500_000,
            "SEA001",
            2021,
            "OWNER002",
        ),
    ]
    .into_iter()
    .enumerate()
    .map(
        |(n, (id_property, name, address, price, code, year, id_owner))| {
            Property {
                id: property::Id::new(),
                id_property: id_property.into(),
                name: name.into(),
                address: address.into(),
                price: Decimal::from(price),
                code_internal: code.into(),
                year,
                id_owner: id_owner.into(),
                created_at: created_at(n).coerce(),
                updated_at: created_at(n).coerce(),
            }
        },
    )
    .collect()
}

/// Builds fixture [`property::Image`]s.
fn images() -> Vec<property::Image> {
    [
        ("IMG001", "PROP001", "Luxury+Apartment+1"),
        ("IMG002", "PROP001", "Luxury+Apartment+2"),
        ("IMG003", "PROP002", "Beach+House+1"),
        ("IMG004", "PROP002", "Beach+House+2"),
        ("IMG005", "PROP003", "Victorian+Home+1"),
        ("IMG006", "PROP003", "Victorian+Home+2"),
        ("IMG007", "PROP004", "Contemporary+Loft+1"),
        ("IMG008", "PROP005", "Ranch+House+1"),
        ("IMG009", "PROP006", "Penthouse+1"),
        ("IMG010", "PROP006", "Penthouse+2"),
        ("IMG011", "PROP006", "Penthouse+3"),
    ]
    .into_iter()
    .map(|(id, id_property, text)| property::Image {
        id: id.into(),
        id_property: id_property.into(),
        file: format!("https://via.placeholder.com/800x600?text={text}"),
        enabled: true,
    })
    .collect()
}

/// Builds fixture [`property::Trace`]s.
fn traces() -> Vec<property::Trace> {
    [
        ("TRACE001", "PROP001", (2023, 6, 15), "Initial Purchase", 2_500_000, 125_000),
        ("TRACE002", "PROP002", (2022, 3, 10), "Market Valuation", 1_800_000, 90_000),
        ("TRACE003", "PROP003", (2023, 1, 20), "Renovation Assessment", 3_200_000, 160_000),
        ("TRACE004", "PROP004", (2023, 8, 5), "Recent Sale", 850_000, 42_500),
        ("TRACE005", "PROP005", (2023, 4, 12), "Property Assessment", 650_000, 32_500),
        ("TRACE006", "PROP006", (2023, 9, 30), "Luxury Purchase", 4_500_000, 225_000),
    ]
    .into_iter()
    .map(|(id, id_property, (y, m, d), name, value, tax)| property::Trace {
        id: id.into(),
        id_property: id_property.into(),
        date_sale: date(y, m, d),
        name: name.into(),
        value: Decimal::from(value),
        tax: Decimal::from(tax),
    })
    .collect()
}
