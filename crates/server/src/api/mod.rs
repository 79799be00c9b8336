pub mod catalog;
pub mod handlers;
pub mod lookup;
pub mod middleware;
pub mod routes;
pub mod sets;

pub use routes::create_router;
