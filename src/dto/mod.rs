pub mod auth_dto;
pub mod common_dto;
pub mod inquiry_dto;
pub mod test_drive_dto;
pub mod transaction_dto;
pub mod vehicle_dto;
