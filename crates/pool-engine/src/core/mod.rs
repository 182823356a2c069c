pub mod aim;
pub mod body;
pub mod collision;
pub mod geometry;
pub mod rack;
pub mod session;
pub mod table;
pub mod time;
