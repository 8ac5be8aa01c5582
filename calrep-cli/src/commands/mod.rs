pub mod replicate;
pub mod space;
pub mod unplaced;
