pub mod convert;
pub mod pairs;
pub mod rates;
pub mod setup;
pub mod ui;
