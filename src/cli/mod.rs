pub mod price;
pub mod ui;
pub mod values;
