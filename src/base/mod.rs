pub mod address;
pub mod amount;
pub mod numeric;
