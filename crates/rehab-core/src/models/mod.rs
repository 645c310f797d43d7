pub mod card;
pub mod patient;
pub mod prediction;
pub mod program;
pub mod upload;
