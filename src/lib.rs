pub mod dv;
pub mod net;
pub mod report;
pub mod sim;

#[cfg(test)]
mod test;
