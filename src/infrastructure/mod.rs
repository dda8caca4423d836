//! Infrastructure layer - storage backends, repositories, and services

pub mod audit;
pub mod bootstrap;
pub mod group;
pub mod logging;
pub mod member;
pub mod storage;
