//! # State Module
//!
//! Per-container session state.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  SessionRegistry   (SessionId → SessionState)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │          │                  │                  │                        │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐                  │
//! │  │ SessionState │  │ SessionState │  │ SessionState │                  │
//! │  │ Arc<Mutex<   │  │     ...      │  │     ...      │                  │
//! │  │  Container   │  │              │  │              │                  │
//! │  │  Session>>   │  │              │  │              │                  │
//! │  └──────────────┘  └──────────────┘  └──────────────┘                  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Registry: RwLock around the map, sessions cloned out as handles     │
//! │  • SessionState: Mutex, one mutation at a time per container           │
//! │  • No state is shared between containers                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod registry;
mod session;

pub use registry::{SessionId, SessionRegistry};
pub use session::{ContainerSession, SessionState};
