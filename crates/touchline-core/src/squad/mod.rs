pub mod catalog;
pub mod composer;
pub mod draft;
pub mod player;
pub mod position;
pub mod price;
pub mod views;
