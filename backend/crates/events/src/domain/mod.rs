pub mod hackathon;
pub mod repository;

pub use hackathon::{Hackathon, HackathonFields};
