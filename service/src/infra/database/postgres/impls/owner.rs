//! [`Owner`]-related [`Database`] implementations.

use common::operations::{All, By, Delete, Insert, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{owner, Owner},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

use super::count;

/// Columns of the `owners` table, in the order [`from_row()`] expects.
const COLUMNS: &str = "\
    id, id_owner, name, address, photo, birthday, created_at, updated_at";

/// Builds an [`Owner`] out of the provided `owners` [`Row`].
fn from_row(row: &Row) -> Owner {
    Owner {
        id: row.get("id"),
        id_owner: row.get("id_owner"),
        name: row.get("name"),
        address: row.get("address"),
        photo: row.get("photo"),
        birthday: row.get("birthday"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl Database<Select<By<Option<Owner>, owner::Id>>> for Postgres {
    type Ok = Option<Owner>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Owner>, owner::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: owner::Id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM owners \
             WHERE id = $1::UUID \
             LIMIT 1",
        );
        self.query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(from_row))
    }
}

impl Database<Select<By<Option<Owner>, owner::IdOwner>>> for Postgres {
    type Ok = Option<Owner>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Owner>, owner::IdOwner>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id_owner: owner::IdOwner = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM owners \
             WHERE id_owner = $1::VARCHAR \
             LIMIT 1",
        );
        self.query_opt(&sql, &[&id_owner])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(from_row))
    }
}

impl Database<Select<By<read::owner::TotalCount, All>>> for Postgres {
    type Ok = read::owner::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<read::owner::TotalCount, All>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT COUNT(*)::INT8 \
            FROM owners";
        self.query_opt(SQL, &[])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.map_or(0, |r| count(r.get(0))).into())
    }
}

impl Database<Insert<Owner>> for Postgres {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(owner): Insert<Owner>,
    ) -> Result<Self::Ok, Self::Err> {
        let Owner {
            id,
            id_owner,
            name,
            address,
            photo,
            birthday,
            created_at,
            updated_at,
        } = owner;

        const SQL: &str = "\
            INSERT INTO owners (\
                id, id_owner, name, address, photo, birthday, \
                created_at, updated_at\
            ) VALUES (\
                $1::UUID, $2::VARCHAR, $3::VARCHAR, $4::VARCHAR, \
                $5::VARCHAR, $6::TIMESTAMPTZ, \
                $7::TIMESTAMPTZ, $8::TIMESTAMPTZ\
            )";
        self.exec(
            SQL,
            &[
                &id,
                &id_owner,
                &name,
                &address,
                &photo,
                &birthday,
                &created_at,
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl Database<Update<Owner>> for Postgres {
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(owner): Update<Owner>,
    ) -> Result<Self::Ok, Self::Err> {
        let Owner {
            id,
            id_owner: _,
            name,
            address,
            photo,
            birthday,
            created_at: _,
            updated_at,
        } = owner;

        // Business ID and creation date are never changed.
        const SQL: &str = "\
            UPDATE owners \
            SET name = $2::VARCHAR, \
                address = $3::VARCHAR, \
                photo = $4::VARCHAR, \
                birthday = $5::TIMESTAMPTZ, \
                updated_at = $6::TIMESTAMPTZ \
            WHERE id = $1::UUID";
        self.exec(
            SQL,
            &[&id, &name, &address, &photo, &birthday, &updated_at],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(|updated| updated > 0)
    }
}

impl Database<Delete<By<Owner, owner::Id>>> for Postgres {
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Owner, owner::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id: owner::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM owners \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|deleted| deleted > 0)
    }
}

impl Database<Delete<By<Owner, All>>> for Postgres {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Delete<By<Owner, All>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "DELETE FROM owners";
        self.exec(SQL, &[]).await.map_err(tracerr::wrap!()).map(drop)
    }
}
