// Profile self-service and admin user management
// Storage goes through the same `UserStore` the auth flow uses

pub mod handlers;
