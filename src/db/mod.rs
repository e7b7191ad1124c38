pub mod logbook;
pub mod migrations;
pub mod repository;
