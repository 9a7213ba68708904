pub mod cluster;
pub mod error;
pub mod policy;
pub mod resource;
pub mod sim;
pub mod workload;

#[cfg(test)]
mod test;
