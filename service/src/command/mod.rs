//! [`Command`] definition.

pub mod clear_data;
pub mod create_owner;
pub mod create_property;
pub mod delete_owner;
pub mod delete_property;
pub mod seed_sample_data;
pub mod update_owner;
pub mod update_property;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    clear_data::ClearData, create_owner::CreateOwner,
    create_property::CreateProperty, delete_owner::DeleteOwner,
    delete_property::DeleteProperty, seed_sample_data::SeedSampleData,
    update_owner::UpdateOwner, update_property::UpdateProperty,
};

#[cfg(test)]
mod spec {
    use std::collections::HashSet;

    use common::{operations::Insert, pagination, DateTime};
    use rust_decimal::Decimal;

    use crate::{
        domain::property,
        infra::{Database as _, Memory},
        query::{self, Query as _},
        read::property::list,
        Service,
    };

    use super::{
        seed_sample_data, ClearData, Command as _, CreateOwner,
        CreateProperty, DeleteOwner, DeleteProperty, SeedSampleData,
        UpdateOwner, UpdateProperty,
    };

    fn create_property(name: &str, price: i64) -> CreateProperty {
        CreateProperty {
            name: name.to_owned(),
            address: "100 Central Park West, New York, NY 10023".to_owned(),
            price: Decimal::from(price),
            code_internal: "NYC001".to_owned(),
            year: 2020,
            id_owner: "OWNER001".into(),
        }
    }

    fn list_all(filter: list::Filter) -> query::properties::List {
        query::properties::List::by(list::Selector {
            arguments: pagination::Arguments::new(1, 100, 100).unwrap(),
            filter,
        })
    }

    #[tokio::test]
    async fn generates_distinct_business_ids() {
        let service = Service::new(Memory::new());

        let mut ids = HashSet::new();
        for n in 0..10 {
            let p = service
                .execute(create_property(&format!("House {n}"), 100))
                .await
                .unwrap();
            assert!(!AsRef::<str>::as_ref(&p.id_property).is_empty());
            assert!(ids.insert(p.id_property));
        }
    }

    #[tokio::test]
    async fn creates_owner_retrievable_by_business_id() {
        let service = Service::new(Memory::new());

        let owner = service
            .execute(CreateOwner {
                name: "John Smith".to_owned(),
                address: "123 Main St".to_owned(),
                photo: None,
                birthday: DateTime::from_date(1980, 5, 15).unwrap().coerce(),
            })
            .await
            .unwrap();

        let found = service
            .execute(query::owner::ByIdOwner::by(owner.id_owner.clone()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.name, "John Smith");
        assert_eq!(found.address, "123 Main St");
        assert_eq!(found.birthday, owner.birthday);
    }

    #[tokio::test]
    async fn details_expose_only_enabled_images_and_sorted_traces() {
        let service = Service::new(Memory::new());
        let p = service.execute(create_property("Loft", 100)).await.unwrap();

        for (id, enabled) in [("IMG1", false), ("IMG2", true)] {
            service
                .database()
                .execute(Insert(property::Image {
                    id: id.into(),
                    id_property: p.id_property.clone(),
                    file: format!("https://img.example/{id}.jpg"),
                    enabled,
                }))
                .await
                .unwrap();
        }
        for (id, (y, m, d)) in
            [("T1", (2021, 1, 1)), ("T2", (2023, 6, 15)), ("T3", (2022, 3, 10))]
        {
            service
                .database()
                .execute(Insert(property::Trace {
                    id: id.into(),
                    id_property: p.id_property.clone(),
                    date_sale: DateTime::from_date(y, m, d).unwrap().coerce(),
                    name: "Sale".to_owned(),
                    value: Decimal::from(100),
                    tax: Decimal::from(5),
                }))
                .await
                .unwrap();
        }

        let details = service
            .execute(query::property::Details::by(p.id))
            .await
            .unwrap()
            .unwrap();

        assert!(details.images.iter().all(|i| i.enabled));
        assert_eq!(details.images.len(), 1);
        let traces: Vec<&str> =
            details.traces.iter().map(|t| t.id.as_ref()).collect::<Vec<_>>();
        assert_eq!(traces, ["T2", "T3", "T1"]);
        assert!(details.owner.is_none());
    }

    #[tokio::test]
    async fn deleted_property_is_not_found() {
        let service = Service::new(Memory::new());

        let never = property::Id::new();
        assert!(service.execute(DeleteProperty { id: never }).await.is_err());

        let p = service.execute(create_property("Loft", 100)).await.unwrap();
        service.execute(DeleteProperty { id: p.id }).await.unwrap();

        let found = service
            .execute(query::property::Details::by(p.id))
            .await
            .unwrap();
        assert!(found.is_none());
        assert!(service.execute(DeleteProperty { id: p.id }).await.is_err());
    }

    #[tokio::test]
    async fn filters_by_price_range_inclusively() {
        let service = Service::new(Memory::new());
        for (name, price) in
            [("A", 50), ("B", 100), ("C", 150), ("D", 200), ("E", 250)]
        {
            _ = service.execute(create_property(name, price)).await.unwrap();
        }

        let page = service
            .execute(list_all(list::Filter::new(
                None,
                None,
                Some(Decimal::from(100)),
                Some(Decimal::from(200)),
            )))
            .await
            .unwrap();

        assert_eq!(page.total_count, 3);
        assert!(page.items.iter().all(|i| {
            i.property.price >= Decimal::from(100)
                && i.property.price <= Decimal::from(200)
        }));
    }

    #[tokio::test]
    async fn update_preserves_creation_date_and_business_id() {
        let service = Service::new(Memory::new());
        let p = service.execute(create_property("Loft", 100)).await.unwrap();

        let updated = service
            .execute(UpdateProperty {
                id: p.id,
                name: "Renovated Loft".to_owned(),
                address: p.address.clone(),
                price: Decimal::from(120),
                code_internal: p.code_internal.clone(),
                year: p.year,
                id_owner: p.id_owner.clone(),
            })
            .await
            .unwrap();

        assert_eq!(updated.created_at, p.created_at);
        assert_eq!(updated.id_property, p.id_property);
        assert!(updated.updated_at >= p.updated_at);
        assert_eq!(updated.name, "Renovated Loft");
    }

    #[tokio::test]
    async fn updating_or_deleting_missing_owner_fails() {
        let service = Service::new(Memory::new());
        let id = crate::domain::owner::Id::new();

        let updated = service
            .execute(UpdateOwner {
                id,
                name: "Nobody".to_owned(),
                address: "Nowhere".to_owned(),
                photo: None,
                birthday: DateTime::UNIX_EPOCH.coerce(),
            })
            .await;
        assert!(matches!(
            updated.map_err(tracerr::Traced::into_inner),
            Err(super::update_owner::ExecutionError::OwnerNotExists(_)),
        ));

        let deleted = service.execute(DeleteOwner { id }).await;
        assert!(matches!(
            deleted.map_err(tracerr::Traced::into_inner),
            Err(super::delete_owner::ExecutionError::OwnerNotExists(_)),
        ));
    }

    #[tokio::test]
    async fn seeds_once_and_clears() {
        let service = Service::new(Memory::new());

        let outcome = service.execute(SeedSampleData).await.unwrap();
        assert_eq!(
            outcome,
            seed_sample_data::Outcome::Seeded(seed_sample_data::Counts {
                owners: 4,
                properties: 6,
                images: 11,
                traces: 6,
            }),
        );
        assert_eq!(
            service.execute(SeedSampleData).await.unwrap(),
            seed_sample_data::Outcome::Skipped,
        );

        let page = service
            .execute(list_all(list::Filter::default()))
            .await
            .unwrap();
        assert_eq!(page.total_count, 6);
        assert_eq!(
            page.items[0].property.name, "Luxury Downtown Apartment",
        );
        assert_eq!(
            page.items[0].owner.as_ref().map(|o| o.name.as_str()),
            Some("John Smith"),
        );
        assert_eq!(
            page.items[0].cover().map(|i| i.id.as_ref()),
            Some("IMG001"),
        );

        service.execute(ClearData).await.unwrap();
        let page = service
            .execute(list_all(list::Filter::default()))
            .await
            .unwrap();
        assert_eq!(page.total_count, 0);
        assert!(matches!(
            service.execute(SeedSampleData).await.unwrap(),
            seed_sample_data::Outcome::Seeded(_),
        ));
    }
}
