//! Equipment management service

use rust_decimal::Decimal;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::equipment::{CreateEquipment, Equipment, EquipmentSummary, UpdateEquipment},
    repository::Repository,
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(
        &self,
        include_archived: bool,
        available_only: bool,
    ) -> AppResult<Vec<EquipmentSummary>> {
        self.repository
            .equipment
            .list(include_archived, available_only)
            .await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        self.repository.equipment.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        if data.daily_rate < Decimal::ZERO {
            return Err(AppError::Validation(
                "daily rate cannot be negative".to_string(),
            ));
        }
        self.repository.equipment.create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        if data.daily_rate.is_some_and(|rate| rate < Decimal::ZERO) {
            return Err(AppError::Validation(
                "daily rate cannot be negative".to_string(),
            ));
        }
        self.repository.equipment.update(id, data).await
    }

    pub async fn archive(&self, id: i32) -> AppResult<Equipment> {
        self.repository.equipment.archive(id).await
    }

    pub async fn unarchive(&self, id: i32) -> AppResult<Equipment> {
        self.repository.equipment.unarchive(id).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.equipment.delete(id).await
    }
}
