//! Config cluster reconciliation
//!
//! A pass flows leaves first: [`resolver`] → [`topology`] and
//! [`credentials`] → [`renderer`] → [`readiness`] → [`publisher`], sequenced
//! by [`pipeline::Reconciler`].

pub mod credentials;
pub mod pipeline;
pub mod publisher;
pub mod readiness;
pub mod renderer;
pub mod resolver;
pub mod topology;

pub use credentials::{CredentialBundle, CredentialResolver};
pub use pipeline::{PassOutcome, Reconciler, Repositories};
pub use publisher::{bundle_name, StatusPublisher};
pub use readiness::{active_threshold, ReadinessState};
pub use renderer::{ArtifactRenderer, RendererSettings};
pub use resolver::{resolve, EffectiveConfig};
pub use topology::{EndpointList, TopologyAggregator, TopologySnapshot};
