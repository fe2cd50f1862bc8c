pub mod health;
pub mod puzzles;
pub mod trainer_ws;
