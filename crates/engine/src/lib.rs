//! Drivers built on top of the core rules: the automated player and
//! campaign progression.

pub mod bot;
pub mod campaign;

pub use bot::{autoplay, take_bot_turn, AutoplaySummary, BotError, BotTurn};
pub use campaign::{Campaign, CampaignError, MemoryProgress, ProgressStore};
