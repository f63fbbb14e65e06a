#[cfg(test)]
mod tests {
    use chrono::Duration;

    use crate::models::maintenance_model::CreateMaintenanceRequest;
    use crate::tests::support::{insert_vehicle, schedule_for, setup, today};

    #[actix_rt::test]
    async fn due_scan_joins_vehicle_owner_and_type() {
        let fx = setup().await;
        let id = schedule_for(&fx, "JOIN01", today()).await;

        let due = fx
            .services
            .maintenance_service
            .find_due_on(today())
            .await
            .unwrap();

        assert_eq!(due.len(), 1);
        let m = &due[0];
        assert_eq!(m.id, id);
        assert_eq!(m.date_of_next_maintenance, today());
        assert_eq!(m.current_mileage, 120_000);
        assert_eq!(m.licence_plate_no, "JOIN01");
        assert_eq!(m.owner.full_name, "Thandi Nkosi");
        assert_eq!(m.owner.email, "owner@example.com");
        assert_eq!(m.owner.phone_number.as_deref(), Some("+27 82 555 0101"));
        assert_eq!(m.vehicle_type.name, "Toyota");
        assert_eq!(m.vehicle_type.model, "Hilux");
        assert_eq!(m.vehicle_type.year, 2019);
    }

    #[actix_rt::test]
    async fn due_scan_matches_exact_date_only() {
        let fx = setup().await;
        schedule_for(&fx, "D1", today()).await;
        schedule_for(&fx, "D2", today() + Duration::days(1)).await;

        let due = fx
            .services
            .maintenance_service
            .find_due_on(today() + Duration::days(1))
            .await
            .unwrap();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].licence_plate_no, "D2");

        let none = fx
            .services
            .maintenance_service
            .find_due_on(today() + Duration::days(2))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[actix_rt::test]
    async fn completing_removes_record_from_scan() {
        let fx = setup().await;
        let id = schedule_for(&fx, "DONE1", today()).await;

        let record = fx
            .services
            .maintenance_service
            .mark_completed(&id, today())
            .await
            .unwrap()
            .expect("record exists");
        assert_eq!(record.date_actually_maintained.as_deref(), Some("2026-10-18"));

        let due = fx
            .services
            .maintenance_service
            .find_due_on(today())
            .await
            .unwrap();
        assert!(due.is_empty());
    }

    #[actix_rt::test]
    async fn completing_unknown_record_returns_none() {
        let fx = setup().await;
        let result = fx
            .services
            .maintenance_service
            .mark_completed("missing", today())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[actix_rt::test]
    async fn list_is_ordered_by_due_date() {
        let fx = setup().await;
        let later = schedule_for(&fx, "L2", today() + Duration::days(30)).await;
        let sooner = schedule_for(&fx, "L1", today() + Duration::days(2)).await;

        let list = fx.services.maintenance_service.list().await.unwrap();
        let ids: Vec<&str> = list.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec![sooner.as_str(), later.as_str()]);
        assert_eq!(list[0].licence_plate_no, "L1");
        assert_eq!(list[0].owner_full_name, "Thandi Nkosi");
    }

    #[actix_rt::test]
    async fn scheduling_for_unknown_vehicle_fails() {
        let fx = setup().await;
        insert_vehicle(&fx.pool, "REAL1", "real@example.com").await;

        let result = fx
            .services
            .maintenance_service
            .schedule(CreateMaintenanceRequest {
                vehicle_id: "ghost".to_string(),
                current_mileage: 10,
                date_of_next_maintenance: today(),
            })
            .await;
        assert!(result.is_err());
    }
}
