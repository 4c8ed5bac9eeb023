pub mod slippage;

pub use slippage::Slippage;
