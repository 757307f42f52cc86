pub mod collection;
pub mod display;
pub mod images;
pub mod locations;
