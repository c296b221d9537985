pub mod auth_routes;
pub mod inquiry_routes;
pub mod seed_routes;
pub mod test_drive_routes;
pub mod transaction_routes;
pub mod vehicle_routes;
pub mod wishlist_routes;
