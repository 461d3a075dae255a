/*!
 * Core Types
 * Common types used across the crate
 */

/// Process ID type
///
/// Signed so the special `kill(2)` targets stay expressible:
/// `0` is the caller's process group, `-1` every permitted process and
/// any other negative value the group `-pid`.
pub type Pid = i32;

/// User ID type
pub type Uid = u32;

/// Address type for fault locations
pub type Address = usize;
