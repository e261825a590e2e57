//! Travel route planner server.
//!
//! A web application that answers: "How can I get from one Indian city to
//! another, and which option suits me best?" Routes are ranked by time,
//! cost or comfort, and signed-in users can have a route's details emailed
//! to them.

pub mod auth;
pub mod config;
pub mod domain;
pub mod email;
pub mod geo;
pub mod search;
pub mod store;
pub mod web;
