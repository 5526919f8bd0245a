mod input;
mod simulator;
