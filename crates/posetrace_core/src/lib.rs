//! Posetrace Core Primitives
//!
//! This crate provides the foundational types for the posetrace workspace:
//!
//! - **3D Math**: `Vec3` positions with the small set of operations pose
//!   capture needs (distance, lerp, axis-angle rotation about a pivot)
//! - **Pose Data**: `PoseSnapshot` (one recorded instant) and `RigPose`
//!   (the live entity set), both preserving insertion order
//! - **Errors**: construction-time contract violations such as duplicate
//!   entity names

pub mod math;
pub mod pose;

pub use math::Vec3;
pub use pose::{PoseError, PoseSnapshot, RigPose};
