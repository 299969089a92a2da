//! [`property::Image`]-related [`Database`] implementations.

use common::operations::{All, By, Delete, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::property,
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl Database<Select<By<Vec<property::Image>, property::IdProperty>>>
    for Postgres
{
    type Ok = Vec<property::Image>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<property::Image>, property::IdProperty>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id_property: property::IdProperty = by.into_inner();

        // Disabled images are never exposed.
        const SQL: &str = "\
            SELECT id, id_property, file, enabled \
            FROM property_images \
            WHERE id_property = $1::VARCHAR \
              AND enabled \
            ORDER BY seq ASC";
        Ok(self
            .query(SQL, &[&id_property])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| property::Image {
                id: row.get("id"),
                id_property: row.get("id_property"),
                file: row.get("file"),
                enabled: row.get("enabled"),
            })
            .collect())
    }
}

impl Database<Insert<property::Image>> for Postgres {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(image): Insert<property::Image>,
    ) -> Result<Self::Ok, Self::Err> {
        let property::Image {
            id,
            id_property,
            file,
            enabled,
        } = image;

        const SQL: &str = "\
            INSERT INTO property_images (id, id_property, file, enabled) \
            VALUES ($1::VARCHAR, $2::VARCHAR, $3::VARCHAR, $4::BOOL)";
        self.exec(SQL, &[&id, &id_property, &file, &enabled])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl Database<Delete<By<property::Image, All>>> for Postgres {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Delete<By<property::Image, All>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "DELETE FROM property_images";
        self.exec(SQL, &[]).await.map_err(tracerr::wrap!()).map(drop)
    }
}
