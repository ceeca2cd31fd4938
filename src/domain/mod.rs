// Domain layer: models, URL state and ports. Depends only on serde/url.

pub mod model;
pub mod ports;
pub mod state;
