pub mod account_repository;
pub mod inquiry_repository;
pub mod test_drive_repository;
pub mod transaction_repository;
pub mod vehicle_repository;
pub mod wishlist_repository;

pub use account_repository::AccountRepository;
pub use inquiry_repository::InquiryRepository;
pub use test_drive_repository::TestDriveRepository;
pub use transaction_repository::TransactionRepository;
pub use vehicle_repository::VehicleRepository;
pub use wishlist_repository::WishlistRepository;
