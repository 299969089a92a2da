//! [`Property`]-related [`Database`] implementations.

use common::operations::{All, By, Delete, Insert, Select, Update};
use itertools::Itertools as _;
use postgres_types::ToSql;
use rust_decimal::Decimal;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{property, Property},
    infra::{
        database::{
            self,
            postgres::{Connection, LikePattern},
            Postgres,
        },
        Database,
    },
    read::property::list,
};

use super::count;

/// Columns of the `properties` table, in the order [`from_row()`] expects.
const COLUMNS: &str = "\
    id, id_property, name, address, price, code_internal, year, id_owner, \
    created_at, updated_at";

/// Builds a [`Property`] out of the provided `properties` [`Row`].
fn from_row(row: &Row) -> Property {
    Property {
        id: row.get("id"),
        id_property: row.get("id_property"),
        name: row.get("name"),
        address: row.get("address"),
        price: row.get("price"),
        code_internal: row.get("code_internal"),
        year: row.get("year"),
        id_owner: row.get("id_owner"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// SQL parameters of a [`list::Filter`].
struct FilterParams {
    /// [`LikePattern`] of the searched name.
    name: Option<LikePattern>,

    /// [`LikePattern`] of the searched address.
    address: Option<LikePattern>,

    /// Inclusive lower bound of the price.
    min_price: Option<Decimal>,

    /// Inclusive upper bound of the price.
    max_price: Option<Decimal>,
}

impl FilterParams {
    /// Prepares [`FilterParams`] out of the provided [`list::Filter`].
    fn new(filter: &list::Filter) -> Self {
        Self {
            name: filter.name.as_deref().map(LikePattern::new),
            address: filter.address.as_deref().map(LikePattern::new),
            min_price: filter.min_price,
            max_price: filter.max_price,
        }
    }

    /// Pushes these [`FilterParams`] to the provided `ps` and returns the SQL
    /// conditions referring them, each prefixed with `AND`.
    fn conditions<'p>(&'p self, ps: &mut Vec<&'p (dyn ToSql + Sync)>) -> String {
        let name_idx = self.name.as_ref().map(|p| push(ps, p));
        let address_idx = self.address.as_ref().map(|p| push(ps, p));
        let min_idx = self.min_price.as_ref().map(|p| push(ps, p));
        let max_idx = self.max_price.as_ref().map(|p| push(ps, p));

        format!(
            "{name} {address} {min} {max}",
            name = name_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!(
                    "AND name ILIKE ${idx}::VARCHAR ESCAPE '\\'"
                ))
            }),
            address = address_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!(
                    "AND address ILIKE ${idx}::VARCHAR ESCAPE '\\'"
                ))
            }),
            min = min_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!("AND price >= ${idx}::NUMERIC"))
            }),
            max = max_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!("AND price <= ${idx}::NUMERIC"))
            }),
        )
    }
}

/// Pushes the provided parameter to `ps` and returns its SQL index.
fn push<'p>(
    ps: &mut Vec<&'p (dyn ToSql + Sync)>,
    param: &'p (dyn ToSql + Sync),
) -> usize {
    ps.push(param);
    ps.len()
}

impl Database<Select<By<Option<Property>, property::Id>>> for Postgres {
    type Ok = Option<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Property>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: property::Id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM properties \
             WHERE id = $1::UUID \
             LIMIT 1",
        );
        self.query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(from_row))
    }
}

impl Database<Select<By<Vec<Property>, list::Selector>>> for Postgres {
    type Ok = Vec<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Property>, list::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let list::Selector { arguments, filter } = by.into_inner();

        let limit = i64::try_from(arguments.limit()).unwrap_or(i64::MAX);
        let offset = i64::try_from(arguments.skip()).unwrap_or(i64::MAX);
        let params = FilterParams::new(&filter);

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![&limit, &offset];
        let conditions = params.conditions(&mut ps);

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM properties \
             WHERE true {conditions} \
             ORDER BY created_at ASC, id ASC \
             LIMIT $1::INT8 \
             OFFSET $2::INT8",
        );
        Ok(self
            .query(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl Database<Select<By<list::TotalCount, list::Filter>>> for Postgres {
    type Ok = list::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<list::TotalCount, list::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = by.into_inner();
        let params = FilterParams::new(&filter);

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![];
        let conditions = params.conditions(&mut ps);

        let sql = format!(
            "SELECT COUNT(*)::INT8 \
             FROM properties \
             WHERE true {conditions}",
        );
        self.query_opt(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.map_or(0, |r| count(r.get(0))).into())
    }
}

impl Database<Insert<Property>> for Postgres {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(property): Insert<Property>,
    ) -> Result<Self::Ok, Self::Err> {
        let Property {
            id,
            id_property,
            name,
            address,
            price,
            code_internal,
            year,
            id_owner,
            created_at,
            updated_at,
        } = property;

        const SQL: &str = "\
            INSERT INTO properties (\
                id, id_property, name, address, price, code_internal, year, \
                id_owner, created_at, updated_at\
            ) VALUES (\
                $1::UUID, $2::VARCHAR, $3::VARCHAR, $4::VARCHAR, \
                $5::NUMERIC, $6::VARCHAR, $7::INT4, \
                $8::VARCHAR, $9::TIMESTAMPTZ, $10::TIMESTAMPTZ\
            )";
        self.exec(
            SQL,
            &[
                &id,
                &id_property,
                &name,
                &address,
                &price,
                &code_internal,
                &year,
                &id_owner,
                &created_at,
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl Database<Update<Property>> for Postgres {
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(property): Update<Property>,
    ) -> Result<Self::Ok, Self::Err> {
        let Property {
            id,
            id_property: _,
            name,
            address,
            price,
            code_internal,
            year,
            id_owner,
            created_at: _,
            updated_at,
        } = property;

        // Business ID and creation date are never changed.
        const SQL: &str = "\
            UPDATE properties \
            SET name = $2::VARCHAR, \
                address = $3::VARCHAR, \
                price = $4::NUMERIC, \
                code_internal = $5::VARCHAR, \
                year = $6::INT4, \
                id_owner = $7::VARCHAR, \
                updated_at = $8::TIMESTAMPTZ \
            WHERE id = $1::UUID";
        self.exec(
            SQL,
            &[
                &id,
                &name,
                &address,
                &price,
                &code_internal,
                &year,
                &id_owner,
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(|updated| updated > 0)
    }
}

impl Database<Delete<By<Property, property::Id>>> for Postgres {
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Property, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id: property::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM properties \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|deleted| deleted > 0)
    }
}

impl Database<Delete<By<Property, All>>> for Postgres {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Delete<By<Property, All>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "DELETE FROM properties";
        self.exec(SQL, &[]).await.map_err(tracerr::wrap!()).map(drop)
    }
}

#[cfg(test)]
mod spec {
    use postgres_types::ToSql;
    use rust_decimal::Decimal;

    use crate::read::property::list;

    use super::FilterParams;

    fn full_filter() -> list::Filter {
        list::Filter::new(
            Some("Loft".into()),
            Some("50%_off".into()),
            Some(Decimal::from(100_000)),
            Some(Decimal::from(900_000)),
        )
    }

    #[test]
    fn numbers_conditions_after_pagination_params() {
        let params = FilterParams::new(&full_filter());
        let (limit, offset) = (12_i64, 24_i64);
        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![&limit, &offset];

        let sql = params.conditions(&mut ps);

        assert_eq!(
            sql,
            "AND name ILIKE $3::VARCHAR ESCAPE '\\' \
             AND address ILIKE $4::VARCHAR ESCAPE '\\' \
             AND price >= $5::NUMERIC \
             AND price <= $6::NUMERIC",
        );
        assert_eq!(ps.len(), 6);
    }

    #[test]
    fn numbers_conditions_from_first_param() {
        let params = FilterParams::new(&full_filter());
        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![];

        let sql = params.conditions(&mut ps);

        assert_eq!(
            sql,
            "AND name ILIKE $1::VARCHAR ESCAPE '\\' \
             AND address ILIKE $2::VARCHAR ESCAPE '\\' \
             AND price >= $3::NUMERIC \
             AND price <= $4::NUMERIC",
        );
        assert_eq!(ps.len(), 4);
    }

    #[test]
    fn skips_absent_criteria() {
        let params = FilterParams::new(&list::Filter::new(
            None,
            Some("Ocean".into()),
            None,
            Some(Decimal::from(500_000)),
        ));
        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![];

        let sql = params.conditions(&mut ps);

        assert_eq!(
            sql.split_whitespace().collect::<Vec<_>>().join(" "),
            "AND address ILIKE $1::VARCHAR ESCAPE '\\' \
             AND price <= $2::NUMERIC",
        );
        assert_eq!(ps.len(), 2);

        let empty =
            FilterParams::new(&list::Filter::new(None, None, None, None));
        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![];
        assert!(empty.conditions(&mut ps).trim().is_empty());
        assert!(ps.is_empty());
    }

    #[test]
    fn searches_literal_substrings() {
        let params = FilterParams::new(&full_filter());

        assert_eq!(
            params.address.as_ref().map(ToString::to_string).as_deref(),
            Some("%50\\%\\_off%"),
        );
    }
}
