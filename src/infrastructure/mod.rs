pub mod database;
pub mod network;
pub mod queue;
pub mod remote;
