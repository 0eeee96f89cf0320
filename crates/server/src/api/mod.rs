pub mod browse;
pub mod handlers;
pub mod middleware;
pub mod navigation;
pub mod routes;
pub mod views;
pub mod watchlist;

pub use routes::create_router;
