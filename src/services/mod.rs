pub mod customers;
pub mod documents;
pub mod orders;
pub mod products;

pub use customers::CustomerService;
pub use documents::DocumentService;
pub use orders::{compute_total, OrderService};
pub use products::ProductService;
