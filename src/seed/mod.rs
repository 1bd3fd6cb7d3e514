//! Startup bootstrap
//!
//! Ensures the expected collections exist, then seeds the fixed
//! administrator account and a small sample data set when no admin is
//! present. Collection probing is idempotent; the sample seeding is
//! guarded only by "admin absent", so a partially seeded store is not
//! repaired.

use bigdecimal::BigDecimal;
use tracing::{error, info};

use crate::config::SeedConfig;
use crate::database::Database;
use crate::errors::AppResult;
use crate::models::{
    ApartmentCreateRequest, ApartmentStatus, BuyerCreateRequest, BuyerStatus, FloorCreateRequest,
    UserCreateRequest, UserRole,
};
use crate::services::{ApartmentService, BuyerService, FloorService, UserService};

pub struct Seeder<'a> {
    pub database: &'a Database,
    pub users: &'a UserService,
    pub floors: &'a FloorService,
    pub apartments: &'a ApartmentService,
    pub buyers: &'a BuyerService,
}

impl Seeder<'_> {
    /// Ensure collections, then seed initial data. Seeding failures are
    /// logged rather than aborting startup.
    pub async fn run(&self, config: &SeedConfig) -> AppResult<()> {
        self.database.ensure_collections().await?;

        if let Err(e) = self.create_initial_data(config).await {
            error!("error creating initial data: {e}");
        }
        Ok(())
    }

    async fn create_initial_data(&self, config: &SeedConfig) -> AppResult<()> {
        if self.users.find_by_email(&config.admin_email).await?.is_some() {
            info!("initial data already exists, skipping seeding");
            return Ok(());
        }

        let admin = self
            .users
            .create(UserCreateRequest {
                email: config.admin_email.clone(),
                password: config.admin_password.clone(),
                role: Some(UserRole::Admin),
                enabled: Some(true),
            })
            .await?;
        info!("created admin user {}", admin.id);

        let ground_floor = self
            .floors
            .create(
                floor("Ground Floor", 0, "Ground floor with main entrance and lobby"),
                None,
            )
            .await?;
        let first_floor = self
            .floors
            .create(
                floor("First Floor", 1, "Ground level floor with garden access"),
                None,
            )
            .await?;
        let second_floor = self
            .floors
            .create(
                floor("Second Floor", 2, "Second floor with premium apartments"),
                None,
            )
            .await?;

        let samples = [
            apartment(
                &ground_floor.id,
                "G01",
                "1 Bedroom",
                65.0,
                180_000,
                ApartmentStatus::Available,
                "Cozy ground floor apartment with garden access",
            ),
            apartment(
                &ground_floor.id,
                "G02",
                "2 Bedroom",
                85.0,
                220_000,
                ApartmentStatus::Reserved,
                "Spacious ground floor apartment with patio",
            ),
            apartment(
                &first_floor.id,
                "101",
                "2 Bedroom",
                85.5,
                250_000,
                ApartmentStatus::Available,
                "Spacious 2-bedroom apartment with garden view",
            ),
            apartment(
                &first_floor.id,
                "102",
                "3 Bedroom",
                120.0,
                350_000,
                ApartmentStatus::Available,
                "Luxury 3-bedroom apartment with balcony",
            ),
            apartment(
                &second_floor.id,
                "201",
                "3 Bedroom",
                130.0,
                380_000,
                ApartmentStatus::Sold,
                "Premium 3-bedroom apartment with city view",
            ),
        ];
        for request in samples {
            let created = self.apartments.create(request, None).await?;
            info!("created sample apartment {}", created.lot_number);
        }

        let buyer = self
            .buyers
            .create(BuyerCreateRequest {
                name: "John Doe".to_string(),
                email: "john.doe@example.com".to_string(),
                phone: Some("+1234567890".to_string()),
                status: BuyerStatus::Interested,
                interested_apartment_ids: Vec::new(),
                budget: Some(500_000.0),
                notes: Some("Interested in 2-bedroom apartments".to_string()),
                contact_date: Some(chrono::Utc::now()),
            })
            .await?;
        info!("created sample buyer {}", buyer.name);

        Ok(())
    }
}

fn floor(name: &str, number: i32, description: &str) -> FloorCreateRequest {
    FloorCreateRequest {
        name: name.to_string(),
        level: Some(number),
        floor_number: Some(number),
        description: Some(description.to_string()),
        total_apartments: None,
        area: 0.0,
        building_id: None,
        floor_plan_url: None,
        model3d_url: None,
        image_urls: Vec::new(),
        apartment_ids: Vec::new(),
        top_view_hotspots: Vec::new(),
        angle_hotspots: Default::default(),
    }
}

#[allow(clippy::too_many_arguments)]
fn apartment(
    floor_id: &str,
    lot: &str,
    unit_type: &str,
    area: f64,
    price: i64,
    status: ApartmentStatus,
    description: &str,
) -> ApartmentCreateRequest {
    ApartmentCreateRequest {
        floor_id: floor_id.to_string(),
        lot_number: lot.to_string(),
        unit_type: unit_type.to_string(),
        area,
        price: BigDecimal::from(price),
        status,
        description: Some(description.to_string()),
        media_urls: Vec::new(),
        model3d_url: None,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::services::MediaService;
    use crate::storage::MemoryObjectStorage;

    fn build() -> (
        Database,
        UserService,
        FloorService,
        ApartmentService,
        BuyerService,
    ) {
        let database = Database::new_in_memory();
        let media = MediaService::new(
            Arc::new(MemoryObjectStorage::new()),
            Duration::from_secs(600),
        );
        (
            database.clone(),
            UserService::new(database.users()),
            FloorService::new(database.floors(), media.clone()),
            ApartmentService::new(database.apartments(), media),
            BuyerService::new(database.buyers()),
        )
    }

    #[tokio::test]
    async fn seeding_is_guarded_by_admin_presence() {
        let (database, users, floors, apartments, buyers) = build();
        let seeder = Seeder {
            database: &database,
            users: &users,
            floors: &floors,
            apartments: &apartments,
            buyers: &buyers,
        };
        let config = SeedConfig::default();

        seeder.run(&config).await.unwrap();
        assert_eq!(floors.get_all().await.unwrap().len(), 3);
        assert_eq!(apartments.get_all().await.unwrap().len(), 5);
        assert_eq!(buyers.get_all().await.unwrap().len(), 1);

        let admin = users
            .find_by_email(&config.admin_email)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin.role, UserRole::Admin);

        // second run is a no-op
        seeder.run(&config).await.unwrap();
        assert_eq!(floors.get_all().await.unwrap().len(), 3);
        assert_eq!(users.get_all().await.unwrap().len(), 1);
    }
}
