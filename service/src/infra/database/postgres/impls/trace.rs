//! [`property::Trace`]-related [`Database`] implementations.

use common::operations::{All, By, Delete, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::property,
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl Database<Select<By<Vec<property::Trace>, property::IdProperty>>>
    for Postgres
{
    type Ok = Vec<property::Trace>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<property::Trace>, property::IdProperty>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id_property: property::IdProperty = by.into_inner();

        const SQL: &str = "\
            SELECT id, id_property, date_sale, name, value, tax \
            FROM property_traces \
            WHERE id_property = $1::VARCHAR \
            ORDER BY date_sale DESC, seq ASC";
        Ok(self
            .query(SQL, &[&id_property])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| property::Trace {
                id: row.get("id"),
                id_property: row.get("id_property"),
                date_sale: row.get("date_sale"),
                name: row.get("name"),
                value: row.get("value"),
                tax: row.get("tax"),
            })
            .collect())
    }
}

impl Database<Insert<property::Trace>> for Postgres {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(trace): Insert<property::Trace>,
    ) -> Result<Self::Ok, Self::Err> {
        let property::Trace {
            id,
            id_property,
            date_sale,
            name,
            value,
            tax,
        } = trace;

        const SQL: &str = "\
            INSERT INTO property_traces (\
                id, id_property, date_sale, name, value, tax\
            ) VALUES (\
                $1::VARCHAR, $2::VARCHAR, $3::TIMESTAMPTZ, $4::VARCHAR, \
                $5::NUMERIC, $6::NUMERIC\
            )";
        self.exec(
            SQL,
            &[&id, &id_property, &date_sale, &name, &value, &tax],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl Database<Delete<By<property::Trace, All>>> for Postgres {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Delete<By<property::Trace, All>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "DELETE FROM property_traces";
        self.exec(SQL, &[]).await.map_err(tracerr::wrap!()).map(drop)
    }
}
