pub mod apollo_client;
pub mod lead_enricher;
pub mod lead_export;
pub mod lead_fetcher;
pub mod lead_pipeline;

pub use apollo_client::*;
pub use lead_enricher::*;
pub use lead_export::*;
pub use lead_fetcher::*;
pub use lead_pipeline::*;
