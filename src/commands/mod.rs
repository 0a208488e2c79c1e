//! Command implementations for gavel

pub mod assign;
pub mod dispatch;
pub mod helpers;
pub mod init;
pub mod leaderboard;
pub mod rubric;
pub mod score;
pub mod submission;
