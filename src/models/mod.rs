pub mod counter;
pub mod customer;
pub mod order;
pub mod product;

pub use counter::Counter;
pub use customer::Customer;
pub use order::{LineItem, NewLineItem, NewOrder, Order};
pub use product::Product;
