pub mod sqrt_price;
