//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!   ┌───────────┐      ┌──────────────────────┐      ┌────────────┐
//!   │ KillFeed  │ ───▶ │  application::Engine │ ───▶ │ Dispatcher │
//!   │ (RedisQ)  │      │  dedup + relevance   │      │ (Discord,  │
//!   └───────────┘      └──────────────────────┘      │  Telegram) │
//!                                                    └────────────┘
//! ```

pub mod outbound;
