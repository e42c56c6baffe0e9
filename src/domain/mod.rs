pub mod analysis;
pub mod record;
pub mod table;
