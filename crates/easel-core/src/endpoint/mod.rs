//! Model endpoint catalog and lifecycle.
//!
//! Generation is served by model endpoints. Managed endpoints are always
//! available; dedicated instance endpoints are started on demand and only
//! count as running once the backend acknowledges they are ready:
//!
//! ```text
//! Off ──request_start──▶ Starting ──ack Ready──▶ On
//!  ▲                        │                     │
//!  └────────ack Failed──────┘                     │
//!  └──────────────────────request_stop────────────┘
//! ```

mod catalog;
mod state;

pub use catalog::{EndpointCatalog, EndpointSource, ModelEndpoint, RunPeriod};
pub use state::{EndpointAck, EndpointState};

/// Tracing target for endpoint lifecycle operations.
pub const TRACING_TARGET: &str = "easel_core::endpoint";
