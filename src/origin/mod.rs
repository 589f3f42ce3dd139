/// Remote origin access - Gateway
mod client;
mod traits;

pub use client::HttpOrigin;
pub use traits::Origin;

#[cfg(test)]
pub use traits::MockOrigin;
