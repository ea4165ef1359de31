//! Vehicle domain model and repository contract.

use async_trait::async_trait;

use crate::Result;

mod model;
pub use model::*;

#[async_trait]
pub trait VehicleRepositoryTrait: Send + Sync {
    fn list_vehicles(&self) -> Result<Vec<VehicleDetails>>;
    fn get_vehicle(&self, vehicle_id: &str) -> Result<VehicleDetails>;
    async fn create_vehicle(&self, new_vehicle: NewVehicle) -> Result<VehicleDetails>;
    async fn update_vehicle(&self, vehicle_id: &str, update: NewVehicle)
        -> Result<VehicleDetails>;
    async fn delete_vehicle(&self, vehicle_id: &str) -> Result<usize>;
}
