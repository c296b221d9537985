pub mod auth_controller;
pub mod inquiry_controller;
pub mod seed_controller;
pub mod test_drive_controller;
pub mod transaction_controller;
pub mod vehicle_controller;
pub mod wishlist_controller;
