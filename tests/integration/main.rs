mod common;
mod config;
mod planner;
