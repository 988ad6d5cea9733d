pub mod connection;
pub mod entity;
pub mod migrations;
pub mod sea_orm_repo;

pub use connection::connect;
pub use sea_orm_repo::SeaOrmHistoryRepository;
