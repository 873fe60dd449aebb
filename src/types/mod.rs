pub mod forecast_row;
pub mod raw_slot;
pub mod wind;
