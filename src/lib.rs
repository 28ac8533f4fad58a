//! Gazette - a small publishing and message board web application
//!
//! This library provides the core functionality for the Gazette web app:
//! blog posts with HTML CRUD and a JSON API, articles with comments,
//! user accounts with sessions, and group membership.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod render;
pub mod services;
pub mod web;
