//! Siabsen - campus attendance management backend.
//!
//! REST service built on Actix Web: catalog and roster CRUD (students,
//! lecturers, courses, class sections, enrollments), device-driven
//! face-recognition check-in, and per-role dashboards.
//!
//! # Architecture
//! - `config`: configuration management
//! - `entity`: SeaORM database entities
//! - `errors`: unified error handling
//! - `middlewares`: authentication, authorization and rate limiting
//! - `models`: data model definitions
//! - `recognition`: face-recognition client boundary
//! - `routes`: API routing layer
//! - `runtime`: runtime lifecycle management
//! - `services`: business logic layer
//! - `storage`: data storage layer (SeaORM)
//! - `utils`: utility functions

pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod recognition;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
